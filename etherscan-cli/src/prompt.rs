//! Interactive API key prompt, used when no key is configured anywhere.

use std::io::IsTerminal;

const PROMPT: &str = "Input etherscan key: ";

/// Ask for the API key on the terminal without echoing it.
///
/// Returns `None` without prompting when stdin is not a terminal or the
/// answer is empty; Etherscan still serves keyless requests at a low rate.
pub fn prompt_api_key() -> std::io::Result<Option<String>> {
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let answer = rpassword::prompt_password(PROMPT)?;
    Ok(normalize_key(&answer))
}

fn normalize_key(answer: &str) -> Option<String> {
    let key = answer.trim();
    (!key.is_empty()).then(|| key.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;

    fn read_api_key(input: &mut impl BufRead) -> Option<String> {
        normalize_key(&rpassword::read_password_from_bufread(input).unwrap())
    }

    #[test]
    fn test_read_api_key() {
        let mut input = std::io::Cursor::new("  ABC123XYZ \n");
        assert_eq!(read_api_key(&mut input).as_deref(), Some("ABC123XYZ"));

        let mut empty = std::io::Cursor::new("\n");
        assert_eq!(read_api_key(&mut empty), None);
    }
}

pub mod cached_response;

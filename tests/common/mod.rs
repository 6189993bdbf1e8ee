#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a fresh `.yaml` file removed when the handle drops
    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("trierouter_test_")
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

pub mod requests {
    use trierouter::dispatcher::{Dispatcher, HandlerResponse};
    use trierouter::server::ParsedRequest;

    /// Dispatch `method uri` and return the response
    pub fn send(dispatcher: &Dispatcher, method: &str, uri: &str) -> HandlerResponse {
        dispatcher.dispatch(&ParsedRequest::new(method, uri))
    }
}

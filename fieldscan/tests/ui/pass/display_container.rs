use std::fmt;

use fieldscan::{Render, Scan};

#[derive(Scan)]
#[scan(display)]
enum Level {
    Debug,
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => f.write_str("debug"),
            Self::Info => f.write_str("info"),
        }
    }
}

#[derive(Scan)]
#[scan(display)]
struct Endpoint {
    host: String,
    port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

fn main() {
    assert_eq!(Level::Debug.render(), "{debug}");
    assert_eq!(vec![Level::Info].render(), "[{info}]");

    let endpoint = Endpoint {
        host: "localhost".to_string(),
        port: 8080,
    };
    assert_eq!(endpoint.render(), "{localhost:8080}");
}

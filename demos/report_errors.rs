//! Collect every syntax error in a broken document.
//!
//! Run with: cargo run --example report_errors
//! Set RUST_LOG=toml_tree=trace to watch each error being recorded.

use toml_tree::{parse, to_string, Error};

const BROKEN: &str = r#"title = "Report"
name = "unterminated
count = 12x

[server]
port = 8080
port = 8081

[[server]]
ok = true
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let err = match parse(BROKEN) {
        Ok(_) => {
            println!("Document parsed without errors");
            return;
        }
        Err(err) => err,
    };

    println!("{}\n", err);

    for error in err.syntax_errors() {
        println!(
            "line {:>2}, column {:>2} [{}]: {}",
            error.line, error.column, error.state, error.message
        );
    }

    // Everything that did parse is still available
    if let Error::Parse { root, .. } = &err {
        match to_string(root) {
            Ok(text) => println!("\nRecovered document:\n{}", text),
            Err(e) => println!("\nRecovered document could not be written: {}", e),
        }
    }
}

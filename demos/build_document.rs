//! Build a document in code, edit it, and write it back out.
//!
//! Run with: cargo run --example build_document

use std::error::Error;
use toml_tree::{
    parse, to_string, to_string_with_options, toml, IntegerBase, LineEnding, Table, TomlInteger,
    TomlNode, TomlOptions, TomlString,
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut doc = Table::new();
    doc.meta.comment = Some("Generated by build_document".to_string());

    doc.insert("name", "toml_tree");
    doc.insert(
        "mask",
        TomlInteger::with_base(0xff, IntegerBase::Hexadecimal),
    );
    doc.insert("path", TomlString::literal("C:\\Users\\demo"));
    doc.insert(
        "notice",
        TomlNode::from(TomlString::multiline("first line\nsecond line"))
            .with_comment("Multiline strings keep their line breaks"),
    );

    // Missing tables are created on first write
    doc.entry("server").key("host").and_then(|slot| slot.set("localhost"));
    doc.entry("server").key("port").and_then(|slot| slot.set(8080));
    if let Some(hosts) = doc.entry("server").key("replicas").and_then(|slot| slot.array()) {
        hosts.push("a.internal");
        hosts.push("b.internal");
    }

    // The macro builds nodes from literal syntax
    doc.insert(
        "limits",
        toml!({ "cpu" = 2, "memory" = "512M", "burst" = { "enabled" = false } }),
    );

    let text = to_string(&doc)?;
    println!("{}", text);

    // What we wrote reads back to the same tree
    let reparsed = parse(&text)?;
    assert_eq!(reparsed, doc);
    println!("✓ Round-trip successful");

    let windows = TomlOptions::new()
        .with_line_ending(LineEnding::CrLf)
        .with_force_ascii(true);
    let crlf = to_string_with_options(&reparsed, windows)?;
    println!("CRLF output is {} bytes", crlf.len());

    Ok(())
}

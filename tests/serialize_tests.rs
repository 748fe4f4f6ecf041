use toml_tree::{
    parse, to_string, to_string_with_options, Array, Error, LineEnding, Table, TomlNode,
    TomlOptions,
};

fn round_trip(source: &str) {
    let table = parse(source).unwrap();
    assert_eq!(to_string(&table).unwrap(), source);
}

#[test]
fn test_document_round_trip() {
    round_trip(
        r#"# Document header

title = "TOML Example"
mask = 0xff
perm = 0o755
flags = 0b1010
ratio = 0.5
when = 1979-05-27T07:32:00-08:00
path = 'C:\Users'

[owner]
# The owner's name
name = "Tom"
dob = 1979-05-27

[[products]]
name = "Hammer"

[[products]]
name = "Nail"
"#,
    );
}

#[test]
fn test_dotted_keys_beside_sections() {
    round_trip("a.b = 1\n\n[c]\nd.e = 2\n");
}

#[test]
fn test_nested_table_array_sections() {
    round_trip(
        "[[fruit]]\nname = \"apple\"\n\n[fruit.physical]\ncolor = \"red\"\n\n[[fruit]]\nname = \"banana\"\n",
    );
}

#[test]
fn test_commented_table_array_element() {
    round_trip("# fruits\n[[fruit]]\nname = 'a'\n");
}

#[test]
fn test_string_forms_round_trip() {
    round_trip("s = \"\"\"\nline one\nline two\"\"\"\n");
    round_trip("re = '''\\d+'''\n");
    round_trip("q = \"say \\\"hi\\\"\"\n");
    round_trip("t = 07:32:00.50\n");
}

#[test]
fn test_special_floats() {
    let table = parse("a = 1e10\nb = -inf\nc = nan\n").unwrap();
    assert_eq!(
        to_string(&table).unwrap(),
        "a = 10000000000.0\nb = -inf\nc = nan\n"
    );
}

#[test]
fn test_edit_then_write() {
    let mut doc = parse("name = \"old\"\nremove_me = 1\n\n[server]\nport = 80\n").unwrap();
    doc.entry("name").set("new");
    doc.remove("remove_me");
    doc.entry("server").key("port").unwrap().set(8080);

    assert_eq!(
        to_string(&doc).unwrap(),
        "name = \"new\"\n\n[server]\nport = 8080\n"
    );
}

#[test]
fn test_built_from_scratch() {
    let mut doc = Table::new();
    doc.entry("title").set("demo");
    doc.entry("server").key("port").unwrap().set(8080);
    let hosts = doc.entry("server").key("hosts").unwrap().array().unwrap();
    hosts.push("a");
    hosts.push("b");

    assert_eq!(
        to_string(&doc).unwrap(),
        "title = \"demo\"\n\n[server]\nport = 8080\nhosts = [ \"a\", \"b\" ]\n"
    );
}

#[test]
fn test_force_ascii() {
    let mut doc = Table::new();
    doc.insert("name", "h\u{e9}llo");
    doc.insert("emoji", "\u{1F600}");

    let options = TomlOptions::new().with_force_ascii(true);
    assert_eq!(
        to_string_with_options(&doc, options).unwrap(),
        "name = \"h\\u00E9llo\"\nemoji = \"\\U0001F600\"\n"
    );

    // Without the option the characters are written as-is
    assert_eq!(
        to_string(&doc).unwrap(),
        "name = \"h\u{e9}llo\"\nemoji = \"\u{1F600}\"\n"
    );
}

#[test]
fn test_crlf_output_parses_back() {
    let table = parse("# top\n\na = 1\n\n[b]\nc = [\n  1,\n  2,\n]\n").unwrap();
    let options = TomlOptions::new().with_line_ending(LineEnding::CrLf);
    let text = to_string_with_options(&table, options).unwrap();

    assert!(!text.replace("\r\n", "").contains('\n'));
    assert_eq!(parse(&text).unwrap(), table);
}

#[test]
fn test_custom_indent() {
    let table = parse("a = [\n  1,\n  2,\n]\n").unwrap();
    let options = TomlOptions::new().with_indent(4);
    assert_eq!(
        to_string_with_options(&table, options).unwrap(),
        "a = [\n    1,\n    2,\n]\n"
    );
}

#[test]
fn test_table_array_of_scalars_is_rejected() {
    let mut array = Array::new_table_array();
    array.push(1);
    let mut doc = Table::new();
    doc.insert("items", array);

    match to_string(&doc) {
        Err(Error::Format(message)) => assert!(message.contains("items")),
        other => panic!("expected a format error, got {other:?}"),
    }
}

#[test]
fn test_output_reparses_to_equal_tree() {
    let source = r#"
title = "x"
nums = [1, 2.5, true, "s", 1979-05-27]
point = { x = 1, y = { z = "deep" } }
a.b.c = 'dotted'

[section]
"quoted key" = 1
sub.value = 2

[[arr]]
v = 1

[[arr]]
[arr.inner]
w = 2
"#;
    let table = parse(source).unwrap();
    let text = to_string(&table).unwrap();
    let again = parse(&text).unwrap();
    assert_eq!(again, table);
    assert_eq!(to_string(&again).unwrap(), text);

    assert_eq!(
        again.get_path(&["point", "y", "z"]).and_then(TomlNode::as_str),
        Some("deep")
    );
}

#[test]
fn test_carriage_returns_in_multiline_strings_survive() {
    let crlf = TomlOptions::new().with_line_ending(LineEnding::CrLf);
    for source in ["s = \"\"\"a\r\nb\"\"\"\n", "s = '''a\r\nb'''\n"] {
        let table = parse(source).unwrap();
        assert_eq!(table.get("s").and_then(TomlNode::as_str), Some("a\r\nb"));

        let text = to_string(&table).unwrap();
        assert_eq!(text, "s = \"\"\"a\\r\nb\"\"\"\n");
        let again = parse(&text).unwrap();
        assert_eq!(again.get("s").and_then(TomlNode::as_str), Some("a\r\nb"));

        let text = to_string_with_options(&table, crlf.clone()).unwrap();
        let again = parse(&text).unwrap();
        assert_eq!(again.get("s").and_then(TomlNode::as_str), Some("a\r\nb"));
    }
}

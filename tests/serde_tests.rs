use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toml_tree::{from_node, from_str, parse, to_node, to_string, to_table, Error, TomlNode};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Mode {
    Fast,
    Careful,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Server {
    host: String,
    port: u16,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Limits {
    max: u64,
    ratio: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Config {
    name: String,
    version: Option<String>,
    mode: Mode,
    servers: Vec<Server>,
    limits: Limits,
}

fn sample() -> Config {
    Config {
        name: "demo".to_string(),
        version: None,
        mode: Mode::Fast,
        servers: vec![
            Server {
                host: "a".to_string(),
                port: 1,
            },
            Server {
                host: "b".to_string(),
                port: 2,
            },
        ],
        limits: Limits {
            max: 10,
            ratio: 0.5,
        },
    }
}

#[test]
fn test_struct_to_document() {
    let text = to_string(&to_table(&sample()).unwrap()).unwrap();
    assert_eq!(
        text,
        "name = \"demo\"\nmode = \"Fast\"\n\n[[servers]]\nhost = \"a\"\nport = 1\n\n[[servers]]\nhost = \"b\"\nport = 2\n\n[limits]\nmax = 10\nratio = 0.5\n"
    );

    let back: Config = from_str(&text).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn test_decode_handwritten_document() {
    let config: Config = from_str(
        r#"
name = "prod"
version = "1.2"
mode = "Careful"
limits = { max = 99, ratio = 1 }

[[servers]]
host = "x"
port = 443
"#,
    )
    .unwrap();

    assert_eq!(config.version.as_deref(), Some("1.2"));
    assert_eq!(config.mode, Mode::Careful);
    assert_eq!(config.servers.len(), 1);
    assert_eq!(config.limits.ratio, 1.0);
}

#[test]
fn test_parse_errors_pass_through() {
    let err = from_str::<Config>("name = \n").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(err.syntax_errors().len(), 1);
}

#[test]
fn test_shape_errors() {
    assert!(from_str::<Config>("name = 1").is_err());
    assert!(from_str::<Server>("host = \"h\"\nport = 70000").is_err());
}

#[test]
fn test_maps_keep_string_keys() {
    let map: BTreeMap<String, i64> = from_str("b = 2\na = 1\n\"c d\" = 3\n").unwrap();
    assert_eq!(map.get("c d"), Some(&3));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b", "c d"]);
}

#[test]
fn test_to_node_limits() {
    assert!(to_node(&u64::MAX).is_err());
    assert!(to_node(&Option::<i32>::None).is_err());
    assert!(to_node(&vec![Some(1), None]).is_err());
    assert!(matches!(to_table(&5), Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_from_node_subtree() {
    let table = parse("[server]\nhost = \"h\"\nport = 22\n").unwrap();
    let node = table.get("server").cloned().unwrap();
    let server: Server = from_node(node).unwrap();
    assert_eq!(
        server,
        Server {
            host: "h".to_string(),
            port: 22
        }
    );
}

#[test]
fn test_document_serializes_to_json() {
    let table = parse(
        "title = \"x\"\nwhen = 1979-05-27T07:32:00Z\n\n[[items]]\nid = 1\n\n[[items]]\nid = 2\nweight = 2.5\n",
    )
    .unwrap();

    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "title": "x",
            "when": "1979-05-27T07:32:00Z",
            "items": [{ "id": 1 }, { "id": 2, "weight": 2.5 }]
        })
    );

    let node: TomlNode = table.into();
    assert_eq!(serde_json::to_string(&node).unwrap().chars().next(), Some('{'));
}

use std::net::Ipv4Addr;

use pretty_assertions::assert_eq;
use query_values::helpers::{PipeDelimited, SpaceDelimited};
use query_values::{Config, Field, Multimap, Reason, Record, Result, Scalar, Values, Walker};

fn values(pairs: &[(&str, &[&str])]) -> Values {
    pairs
        .iter()
        .map(|(key, values)| {
            (
                (*key).to_owned(),
                values.iter().map(|v| (*v).to_owned()).collect(),
            )
        })
        .collect()
}

/// A port number that refuses zero.
#[derive(Debug, Default, PartialEq)]
struct Port(u16);

impl Scalar for Port {
    fn decode_scalar(&mut self, raw: &str) -> std::result::Result<(), Reason> {
        match raw.parse::<u16>() {
            Ok(0) => Err(Reason::custom("port must not be zero")),
            Ok(port) => {
                self.0 = port;
                Ok(())
            }
            Err(_) => Err(Reason::Integer),
        }
    }
}

/// Every value given for the key, in order.
#[derive(Debug, Default, PartialEq)]
struct Repeated(Vec<Ipv4Addr>);

impl Field for Repeated {
    fn decode_field(&mut self, values: &[String]) -> std::result::Result<(), Reason> {
        self.0 = values
            .iter()
            .map(|v| v.parse().map_err(Reason::custom))
            .collect::<std::result::Result<_, _>>()?;
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Record)]
struct Listen {
    port: Port,
    ports: Vec<Port>,
    #[query(rename = "addr")]
    addrs: Repeated,
    names: PipeDelimited<String>,
    words: SpaceDelimited<String>,
}

#[test]
fn custom_scalars() {
    let input = values(&[("port", &["8080"]), ("ports", &["80,443"])]);
    let listen: Listen = query_values::from_values(&input).unwrap();
    assert_eq!(listen.port, Port(8080));
    assert_eq!(listen.ports, vec![Port(80), Port(443)]);

    let input = values(&[("port", &["0"])]);
    let err = query_values::from_values::<Listen>(&input).unwrap_err();
    insta::assert_snapshot!(err, @r#"value "port": port must not be zero"#);

    let input = values(&[("ports", &["80,0"])]);
    let err = query_values::from_values::<Listen>(&input).unwrap_err();
    insta::assert_snapshot!(err, @r#"value "ports[1]": port must not be zero"#);
}

#[test]
fn custom_fields_see_every_value() {
    let input = values(&[("addr", &["10.0.0.1", "10.0.0.2"])]);
    let listen: Listen = query_values::from_values(&input).unwrap();
    assert_eq!(
        listen.addrs,
        Repeated(vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)])
    );

    let input = values(&[("addr", &["10.0.0.1", "bogus"])]);
    let err = query_values::from_values::<Listen>(&input).unwrap_err();
    assert_eq!(err.key(), "addr");
    insta::assert_snapshot!(err, @r#"value "addr": invalid IPv4 address syntax"#);
}

#[test]
fn delimited_fields() {
    let input = values(&[("names", &["a,b|c"]), ("words", &["x y"])]);
    let listen: Listen = query_values::from_values(&input).unwrap();
    assert_eq!(*listen.names, vec!["a,b", "c"]);
    assert_eq!(listen.words.into_inner(), vec!["x", "y"]);
}

/// Accepts any `filter.<field>` key; the walk only knows `sort`.
#[derive(Debug, Default, PartialEq)]
struct Filters {
    sort: String,
    filters: Vec<(String, String)>,
}

impl Record for Filters {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<()> {
        walker.field("sort", &mut self.sort)
    }

    fn decode_values(&mut self, values: &dyn Multimap, config: &Config) -> Result<()> {
        let mut walker = Walker::new(values);
        self.walk(&mut walker)?;
        for key in values.keys() {
            let Some(field) = key.strip_prefix("filter.") else {
                continue;
            };
            let mut value = String::new();
            walker.field(key, &mut value)?;
            self.filters.push((field.to_owned(), value));
        }
        walker.finish(config)
    }
}

#[test]
fn records_can_take_over_decoding() {
    let input = values(&[
        ("sort", &["name"]),
        ("filter.team", &["core"]),
        ("filter.role", &["admin"]),
    ]);
    let filters: Filters = query_values::from_values(&input).unwrap();
    assert_eq!(filters.sort, "name");
    assert_eq!(
        filters.filters,
        vec![
            ("role".to_owned(), "admin".to_owned()),
            ("team".to_owned(), "core".to_owned()),
        ]
    );

    let input = values(&[("order", &["asc"])]);
    let err = query_values::from_values::<Filters>(&input).unwrap_err();
    insta::assert_snapshot!(err, @r#"unknown query: "order""#);
}

#[derive(Debug, Default, PartialEq, Record)]
#[query(rename_all = "camelCase")]
struct Paging {
    page_size: u32,
    #[query(rename = "p")]
    page: u32,
}

#[derive(Debug, Default, PartialEq, Record)]
#[query(rename_all = "kebab-case")]
struct Search {
    r#type: String,
    sort_by: Option<String>,
    #[query(flatten)]
    paging: Option<Box<Paging>>,
    #[query(rename = "")]
    cached: bool,
    #[query(rename = "-")]
    hidden: String,
}

#[test]
fn derived_keys() {
    let input = values(&[
        ("type", &["user"]),
        ("sort-by", &["name"]),
        ("pageSize", &["20"]),
        ("p", &["2"]),
    ]);
    let search: Search = query_values::from_values(&input).unwrap();
    assert_eq!(
        search,
        Search {
            r#type: "user".to_owned(),
            sort_by: Some("name".to_owned()),
            paging: Some(Box::new(Paging {
                page_size: 20,
                page: 2
            })),
            cached: false,
            hidden: String::new(),
        }
    );

    for key in ["sort_by", "page_size", "page", "cached", "hidden", "-"] {
        let input = values(&[(key, &["1"])]);
        let err = query_values::from_values::<Search>(&input).unwrap_err();
        assert_eq!(err, query_values::Error::UnknownKey(key.to_owned()));
    }
}

#[derive(Debug, Default, PartialEq, Record)]
struct Page<T, F> {
    items: Vec<T>,
    #[query(flatten)]
    filter: F,
    total: u64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Owner {
    owner: String,
}

#[test]
fn generic_records() {
    let input = values(&[("items", &["3,4"]), ("owner", &["ada"])]);
    let page: Page<u8, Owner> = query_values::from_values(&input).unwrap();
    assert_eq!(
        page,
        Page {
            items: vec![3, 4],
            filter: Owner {
                owner: "ada".to_owned()
            },
            total: 0,
        }
    );
}

// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use flatlog::Level;
use flatlog::Value;
use flatlog::append::Testing;
use flatlog::event;
use flatlog::layout::Format;

fn order() -> Value {
    let customer: Value = [("name", Value::from("ada")), ("vip", Value::from(true))]
        .into_iter()
        .collect();
    [
        ("id", Value::from(42)),
        ("customer", customer),
        ("items", Value::from(vec!["book", "pen"])),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_every_level_is_written_exactly_once() {
    let out = Testing::default();
    let err = Testing::default();
    let logger = flatlog::builder()
        .host("web-1")
        .app("shop")
        .threshold(Level::Warn)
        .stdout(out.clone())
        .stderr(err.clone())
        .build();

    logger.trace([event::msg("t")]);
    logger.debug([event::msg("d")]);
    logger.info([event::msg("i")]);
    logger.warn([event::msg("w")]);
    logger.error([event::msg("e")]);

    let out = out.lines();
    let err = err.lines();
    assert_eq!(out.len() + err.len(), 5);
    for (line, level) in err.iter().zip(["TRACE", "DEBUG", "INFO"]) {
        assert!(line.contains(&format!(r#""level"="{level}""#)), "{line}");
    }
    for (line, level) in out.iter().zip(["WARN", "ERROR"]) {
        assert!(line.contains(&format!(r#""level"="{level}""#)), "{line}");
    }
}

#[test]
fn test_kvp_line_flattens_payload() {
    let out = Testing::default();
    let logger = flatlog::builder()
        .host("web-1")
        .app("shop")
        .stdout(out.clone())
        .build();

    logger.info([event::msg("order placed"), event::payload(order())]);

    let line = out.take().remove(0);
    assert!(line.starts_with(r#""date"=""#), "{line}");
    assert!(line.ends_with(concat!(
        r#""host"="web-1" "app"="shop" "level"="INFO" "msg"="order placed" "#,
        r#""event_customer_name"="ada" "event_customer_vip"="true" "event_id"="42" "#,
        r#""event_items_0"="book" "event_items_1"="pen" "#,
    )));
}

#[test]
fn test_json_line_keeps_payload_nested() {
    let out = Testing::default();
    let logger = flatlog::builder()
        .host("web-1")
        .app("shop")
        .format(Format::Json)
        .stdout(out.clone())
        .build();

    logger.info([event::payload(order())]);
    logger.info([]);

    let lines = out.take();
    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["host"], "web-1");
    assert_eq!(first["app"], "shop");
    assert_eq!(first["level"], "INFO");
    assert_eq!(first["event"]["customer"]["vip"], true);
    assert_eq!(first["event"]["items"][1], "pen");
    assert!(first.get("msg").is_none());

    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert!(second.get("event").is_none());
    assert_eq!(second["app"], "shop");
}

#[test]
fn test_free_functions_route_with_default_threshold() {
    let out = Testing::default();
    let err = Testing::default();
    let logger = flatlog::builder()
        .host("web-1")
        .threshold(Level::Error)
        .stdout(out.clone())
        .stderr(err.clone())
        .build();
    flatlog::set_default_logger(logger).unwrap();
    assert_eq!(flatlog::default_threshold(), Level::Debug);

    flatlog::debug([event::msg("debug")]);
    flatlog::trace!("trace {}", 1);
    flatlog::default_logger().debug([event::msg("own threshold")]);

    let out = out.lines();
    let err = err.lines();
    assert_eq!(out.len(), 1);
    assert!(out[0].contains(r#""msg"="debug""#));
    assert_eq!(err.len(), 2);
    assert!(err[0].contains(r#""level"="TRACE" "msg"="trace 1""#));
    assert!(err[1].contains(r#""msg"="own threshold""#));
}

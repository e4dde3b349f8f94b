use anyhow::Result;
use chrono::{TimeZone, Utc};
use xmlrpc_wire::{SerializerResolver, StreamConfig, Value, XmlSink};

fn render_with(
    resolver: &SerializerResolver,
    config: &StreamConfig,
    value: &Value,
) -> Result<String> {
    let mut sink = XmlSink::new(Vec::new());
    resolver.write_value(config, &mut sink, value)?;
    Ok(String::from_utf8(sink.into_inner())?)
}

#[test]
fn test_date_wire_form_in_utc() -> Result<()> {
    let resolver = SerializerResolver::new();
    let config = StreamConfig::new();
    let value = Value::DateTime(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());
    assert_eq!(
        render_with(&resolver, &config, &value)?,
        "<value><dateTime.iso8601>20240310T12:00:00</dateTime.iso8601></value>"
    );
    Ok(())
}

#[test]
fn test_fields_are_zero_padded() -> Result<()> {
    let resolver = SerializerResolver::new();
    let config = StreamConfig::new();
    let value = Value::DateTime(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    assert_eq!(
        render_with(&resolver, &config, &value)?,
        "<value><dateTime.iso8601>20240102T03:04:05</dateTime.iso8601></value>"
    );
    Ok(())
}

#[test]
fn test_offset_change_between_writes_takes_effect() -> Result<()> {
    // One resolver across both writes; only the config changes.
    let resolver = SerializerResolver::new();
    let value = Value::DateTime(Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap());

    let mut config = StreamConfig::with_utc_offset_minutes(120);
    let ahead = render_with(&resolver, &config, &value)?;
    assert_eq!(
        ahead,
        "<value><dateTime.iso8601>20240310T14:00:00</dateTime.iso8601></value>"
    );

    config.set_utc_offset_minutes(-330);
    let behind = render_with(&resolver, &config, &value)?;
    assert_eq!(
        behind,
        "<value><dateTime.iso8601>20240310T06:30:00</dateTime.iso8601></value>"
    );
    Ok(())
}

#[test]
fn test_offset_crossing_midnight_changes_date_fields() -> Result<()> {
    let resolver = SerializerResolver::new();
    let config = StreamConfig::with_utc_offset_minutes(60);
    let value = Value::DateTime(Utc.with_ymd_and_hms(2024, 12, 31, 23, 30, 0).unwrap());
    assert_eq!(
        render_with(&resolver, &config, &value)?,
        "<value><dateTime.iso8601>20250101T00:30:00</dateTime.iso8601></value>"
    );
    Ok(())
}

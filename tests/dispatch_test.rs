use std::sync::Arc;
use std::thread;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use xmlrpc_wire::{
    EncodeError, PrimitiveArray, SerializerResolver, StreamConfig, TypeSerializer, Value,
    WriteContext, XmlSink,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn serializer_ptr(resolver: &SerializerResolver, value: &Value) -> *const () {
    resolver.resolve(value) as *const dyn TypeSerializer as *const ()
}

#[test]
fn test_small_integer_kinds_share_one_serializer() {
    let resolver = SerializerResolver::new();
    let int_ptr = serializer_ptr(&resolver, &Value::from(1i8));
    assert_eq!(int_ptr, serializer_ptr(&resolver, &Value::from(2i16)));
    assert_eq!(int_ptr, serializer_ptr(&resolver, &Value::from(3i32)));
}

#[test]
fn test_floating_point_kinds_share_one_serializer() {
    let resolver = SerializerResolver::new();
    let double_ptr = serializer_ptr(&resolver, &Value::from(1.5f32));
    assert_eq!(double_ptr, serializer_ptr(&resolver, &Value::from(2.5f64)));
    assert_ne!(double_ptr, serializer_ptr(&resolver, &Value::Int(1)));
}

#[test]
fn test_date_serializer_constructed_once_per_resolver() {
    let resolver = SerializerResolver::new();
    let first = serializer_ptr(
        &resolver,
        &Value::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
    );
    let second = serializer_ptr(
        &resolver,
        &Value::DateTime(Utc.with_ymd_and_hms(2025, 6, 2, 3, 4, 5).unwrap()),
    );
    assert_eq!(first, second);
}

#[test]
fn test_primitive_array_serializer_cached() {
    let resolver = SerializerResolver::new();
    let first = serializer_ptr(&resolver, &Value::Primitives(PrimitiveArray::Int(vec![1])));
    let second = serializer_ptr(
        &resolver,
        &Value::Primitives(PrimitiveArray::Double(vec![1.0])),
    );
    assert_eq!(first, second);
}

#[test]
fn test_serializer_rejects_wrong_shape() {
    init_logging();
    let resolver = SerializerResolver::new();
    let config = StreamConfig::new();
    let ctx = WriteContext {
        config: &config,
        resolver: &resolver,
    };
    let int_serializer = resolver.resolve(&Value::Int(1));

    let mut sink = XmlSink::new(Vec::new());
    let err = int_serializer
        .write(&ctx, &mut sink, &Value::Bool(true))
        .unwrap_err();
    match err {
        EncodeError::ShapeMismatch { expected, found } => {
            assert_eq!(expected, "int");
            assert_eq!(found, "bool");
        }
        other => panic!("expected shape mismatch, got {other}"),
    }
}

#[test]
fn test_resolver_shared_across_threads() {
    init_logging();
    let resolver = Arc::new(SerializerResolver::new());
    let mut handles = Vec::new();
    for seconds in 0..4u32 {
        let resolver = Arc::clone(&resolver);
        handles.push(thread::spawn(move || -> Result<Vec<u8>> {
            let config = StreamConfig::new();
            let mut sink = XmlSink::new(Vec::new());
            let value = Value::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, seconds).unwrap());
            resolver.write_value(&config, &mut sink, &value)?;
            Ok(sink.into_inner())
        }));
    }
    for handle in handles {
        let out = handle.join().expect("worker panicked").expect("write failed");
        assert!(!out.is_empty());
    }
}

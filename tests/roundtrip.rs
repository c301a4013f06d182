//! Property tests for the binary and formatted codecs.

use eclio::codec::binary::{
    read_binary_array, read_binary_header, write_binary_array, write_binary_header,
};
use eclio::codec::formatted::{
    read_formatted_array, read_formatted_header, write_formatted_array, write_formatted_header,
};
use eclio::codec::EclElement;
use eclio::file::io::{reverse_double, reverse_float, reverse_int};
use eclio::{ArrayType, Parser};
use proptest::prelude::*;

fn binary_roundtrip<T: EclElement + Clone>(values: &[T]) -> Vec<T> {
    let mut buffer = Vec::new();
    write_binary_array(&mut buffer, values).unwrap();

    let mut parser = Parser::new(&buffer);
    let count = i32::try_from(values.len()).unwrap();
    let read = read_binary_array(&mut parser, "PROPTEST", count).unwrap();
    assert!(!parser.has_more_data());
    read
}

fn formatted_roundtrip<T: EclElement + Clone>(values: &[T]) -> Vec<T> {
    let mut buffer = Vec::new();
    write_formatted_array(&mut buffer, values).unwrap();

    let mut parser = Parser::new(&buffer);
    let count = i32::try_from(values.len()).unwrap();
    let read = read_formatted_array(&mut parser, "PROPTEST", count).unwrap();
    assert!(!parser.has_more_data());
    read
}

fn formatted_text<T: EclElement>(values: &[T]) -> String {
    let mut buffer = Vec::new();
    write_formatted_array(&mut buffer, values).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Any finite `f32`, subnormals and extreme exponents included
fn finite_f32() -> impl Strategy<Value = f32> {
    prop_oneof![
        any::<u32>().prop_map(f32::from_bits),
        prop::num::f32::SUBNORMAL | prop::num::f32::POSITIVE | prop::num::f32::NEGATIVE,
        Just(f32::MAX),
        Just(f32::MIN_POSITIVE),
        Just(-f32::from_bits(1)),
    ]
    .prop_filter("finite", |value| value.is_finite())
}

/// Any finite `f64`, subnormals and extreme exponents included
fn finite_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<u64>().prop_map(f64::from_bits),
        prop::num::f64::SUBNORMAL | prop::num::f64::POSITIVE | prop::num::f64::NEGATIVE,
        Just(f64::MAX),
        Just(f64::MIN_POSITIVE),
        Just(-f64::from_bits(1)),
    ]
    .prop_filter("finite", |value| value.is_finite())
}

fn bits32(values: &[f32]) -> Vec<u32> {
    values.iter().map(|value| value.to_bits()).collect()
}

fn bits64(values: &[f64]) -> Vec<u64> {
    values.iter().map(|value| value.to_bits()).collect()
}

fn chunk_count(buffer: &[u8]) -> usize {
    let mut parser = Parser::new(buffer);
    let mut chunks = 0;
    while parser.has_more_data() {
        let head: i32 = parser.read_be().unwrap();
        parser.advance_by(usize::try_from(head).unwrap() + 4).unwrap();
        chunks += 1;
    }
    chunks
}

fn padded(value: &str) -> String {
    format!("{value:<8}")
}

// ============================================================================
// Byte order
// ============================================================================

proptest! {
    #[test]
    fn reverse_int_is_involution(value in any::<i32>()) {
        prop_assert_eq!(reverse_int(reverse_int(value)), value);
    }

    #[test]
    fn reverse_float_is_involution(bits in any::<u32>()) {
        let value = f32::from_bits(bits);
        prop_assert_eq!(reverse_float(reverse_float(value)).to_bits(), bits);
    }

    #[test]
    fn reverse_double_is_involution(bits in any::<u64>()) {
        let value = f64::from_bits(bits);
        prop_assert_eq!(reverse_double(reverse_double(value)).to_bits(), bits);
    }
}

// ============================================================================
// Headers
// ============================================================================

fn header_type() -> impl Strategy<Value = ArrayType> {
    prop_oneof![
        Just(ArrayType::Inte),
        Just(ArrayType::Real),
        Just(ArrayType::Doub),
        Just(ArrayType::Logi),
        Just(ArrayType::Char),
        Just(ArrayType::Mess),
    ]
}

proptest! {
    #[test]
    fn binary_header_roundtrip(name in "[A-Z0-9_ ]{8}", count in any::<i32>(), ty in header_type()) {
        let mut buffer = Vec::new();
        write_binary_header(&mut buffer, &name, count, ty.tag()).unwrap();
        prop_assert_eq!(buffer.len(), 24);

        let header = read_binary_header(&mut Parser::new(&buffer)).unwrap();
        prop_assert_eq!(header.name, name);
        prop_assert_eq!(header.count, count);
        prop_assert_eq!(header.type_tag, ty.tag());
    }

    #[test]
    fn formatted_header_roundtrip(name in "[A-Z0-9_ ]{8}", count in 0..i32::MAX, ty in header_type()) {
        let mut buffer = Vec::new();
        write_formatted_header(&mut buffer, &name, count, ty.tag()).unwrap();

        let header = read_formatted_header(&mut Parser::new(&buffer)).unwrap();
        prop_assert_eq!(header.name, name);
        prop_assert_eq!(header.count, count);
        prop_assert_eq!(header.type_tag, ty.tag());
    }
}

// ============================================================================
// Binary payloads
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn binary_inte_roundtrip(values in prop::collection::vec(any::<i32>(), 0..2600)) {
        prop_assert_eq!(binary_roundtrip(&values), values);
    }

    #[test]
    fn binary_real_roundtrip(bits in prop::collection::vec(any::<u32>(), 0..2600)) {
        let values: Vec<f32> = bits.iter().map(|&b| f32::from_bits(b)).collect();
        let read: Vec<u32> = binary_roundtrip(&values).iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(read, bits);
    }

    #[test]
    fn binary_doub_roundtrip(bits in prop::collection::vec(any::<u64>(), 0..2600)) {
        let values: Vec<f64> = bits.iter().map(|&b| f64::from_bits(b)).collect();
        let read: Vec<u64> = binary_roundtrip(&values).iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(read, bits);
    }

    #[test]
    fn binary_logi_roundtrip(values in prop::collection::vec(any::<bool>(), 0..2600)) {
        prop_assert_eq!(binary_roundtrip(&values), values);
    }

    #[test]
    fn binary_char_roundtrip(values in prop::collection::vec("[A-Z0-9 _]{0,8}", 0..400)) {
        let expected: Vec<String> = values.iter().map(|v| padded(v)).collect();
        prop_assert_eq!(binary_roundtrip(&values), expected);
    }
}

#[test]
fn binary_chunk_boundaries() {
    for ty in [ArrayType::Inte, ArrayType::Char] {
        let ceiling = ty.block_elements();
        for count in [0, 1, ceiling - 1, ceiling, ceiling + 1, 3 * ceiling, 3 * ceiling + 7] {
            let mut buffer = Vec::new();
            if ty == ArrayType::Inte {
                let values: Vec<i32> = (0..count as i32).collect();
                write_binary_array(&mut buffer, &values).unwrap();
                assert_eq!(binary_roundtrip(&values), values);
            } else {
                let values: Vec<String> = (0..count).map(|i| format!("W{i}")).collect();
                write_binary_array(&mut buffer, &values).unwrap();
                let expected: Vec<String> = values.iter().map(|v| padded(v)).collect();
                assert_eq!(binary_roundtrip(&values), expected);
            }

            assert_eq!(chunk_count(&buffer), count.div_ceil(ceiling), "{ty} x {count}");
        }
    }
}

#[test]
fn binary_exact_multiple_has_no_empty_chunk() {
    let values = vec![1.5_f64; 4000];
    let mut buffer = Vec::new();
    write_binary_array(&mut buffer, &values).unwrap();

    assert_eq!(chunk_count(&buffer), 4);
    assert_eq!(buffer.len(), 4 * (8 + 8000));
}

// ============================================================================
// Formatted payloads
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn formatted_inte_roundtrip(values in prop::collection::vec(any::<i32>(), 0..2600)) {
        prop_assert_eq!(formatted_roundtrip(&values), values);
    }

    #[test]
    fn formatted_real_exact_quarters(quarters in prop::collection::vec(-999_999_i32..1_000_000, 0..1200)) {
        let values: Vec<f32> = quarters.iter().map(|&q| q as f32 / 4.0).collect();
        prop_assert_eq!(formatted_roundtrip(&values), values);
    }

    #[test]
    fn formatted_real_stable_after_one_trip(values in prop::collection::vec(finite_f32(), 0..600)) {
        let first_text = formatted_text(&values);
        let first = formatted_roundtrip(&values);

        prop_assert_eq!(&formatted_text(&first), &first_text);
        let second = formatted_roundtrip(&first);
        prop_assert_eq!(bits32(&second), bits32(&first));
    }

    #[test]
    fn formatted_doub_stable_after_one_trip(values in prop::collection::vec(finite_f64(), 0..600)) {
        let first_text = formatted_text(&values);
        let first = formatted_roundtrip(&values);

        prop_assert_eq!(&formatted_text(&first), &first_text);
        let second = formatted_roundtrip(&first);
        prop_assert_eq!(bits64(&second), bits64(&first));
    }

    #[test]
    fn formatted_logi_roundtrip(values in prop::collection::vec(any::<bool>(), 0..2600)) {
        prop_assert_eq!(formatted_roundtrip(&values), values);
    }

    #[test]
    fn formatted_char_roundtrip(values in prop::collection::vec("[A-Z0-9_]{1,8}", 0..300)) {
        let expected: Vec<String> = values.iter().map(|v| padded(v)).collect();
        prop_assert_eq!(formatted_roundtrip(&values), expected);
    }
}

#[test]
fn formatted_line_layout() {
    for (ty, count) in [
        (ArrayType::Inte, 2003),
        (ArrayType::Real, 1001),
        (ArrayType::Doub, 1000),
        (ArrayType::Logi, 60),
        (ArrayType::Char, 220),
    ] {
        let mut buffer = Vec::new();
        match ty {
            ArrayType::Inte => write_formatted_array(&mut buffer, &vec![7_i32; count]),
            ArrayType::Real => write_formatted_array(&mut buffer, &vec![0.5_f32; count]),
            ArrayType::Doub => write_formatted_array(&mut buffer, &vec![0.5_f64; count]),
            ArrayType::Logi => write_formatted_array(&mut buffer, &vec![true; count]),
            _ => write_formatted_array(&mut buffer, &vec!["WELL".to_string(); count]),
        }
        .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let width = ty.column_width();
        let mut values = 0;
        for line in text.lines() {
            assert!(!line.is_empty(), "{ty}: blank line");
            assert_eq!(line.len() % width, 0, "{ty}: ragged line {line:?}");
            let on_line = line.len() / width;
            assert!(on_line <= ty.columns(), "{ty}: {on_line} values on a line");

            // a short line only ends a block or the array
            values += on_line;
            if on_line < ty.columns() {
                assert!(values % ty.formatted_block() == 0 || values == count, "{ty}");
            }
        }
        assert_eq!(values, count);
    }
}

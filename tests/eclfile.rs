//! Reading and writing whole files on disk.

use std::fs;

use eclio::codec::binary::{is_eof, read_binary_header, read_binary_logi_array};
use eclio::codec::formatted::{
    read_formatted_char_array, read_formatted_header, read_formatted_inte_array,
};
use eclio::prelude::*;

fn write_case(output: &mut EclOutput<impl std::io::Write>) {
    output.write("INTEHEAD", &(0..411).collect::<Vec<i32>>()).unwrap();
    output.write("LOGIHEAD", &[true, false, true]).unwrap();
    output
        .write("PORV", &(0..2500).map(|i| i as f32 * 0.5).collect::<Vec<_>>())
        .unwrap();
    output.write("TIME", &[0.0_f64, 31.0, 59.0]).unwrap();
    output
        .write("ZWEL", &["PROD1".to_string(), "INJ1".to_string(), "".to_string()])
        .unwrap();
    output.message("STARTSOL").unwrap();
    output.write("PRESSURE", &vec![250.25_f32; 1003]).unwrap();
    output.message("ENDSOL").unwrap();
}

#[test]
fn binary_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CASE.INIT");

    let mut output = EclOutput::create(&path).unwrap();
    assert!(!output.is_formatted());
    write_case(&mut output);
    output.close().unwrap();

    let mut file = EclFile::open(&path).unwrap();
    assert!(!file.is_formatted());
    assert_eq!(file.len(), 8);

    let names: Vec<String> = file.list().into_iter().map(|entry| entry.name).collect();
    assert_eq!(
        names,
        ["INTEHEAD", "LOGIHEAD", "PORV", "TIME", "ZWEL", "STARTSOL", "PRESSURE", "ENDSOL"]
    );

    file.load_data().unwrap();
    assert_eq!(file.get_named::<i32>("INTEHEAD").unwrap()[410], 410);
    assert_eq!(file.get_named::<bool>("LOGIHEAD").unwrap(), [true, false, true]);
    assert_eq!(file.get_named::<f32>("PORV").unwrap()[2499], 1249.5);
    assert_eq!(file.get_named::<f64>("TIME").unwrap(), [0.0, 31.0, 59.0]);
    assert_eq!(file.get_named::<String>("ZWEL").unwrap(), ["PROD1", "INJ1", ""]);
    assert_eq!(file.get_named::<f32>("PRESSURE").unwrap().len(), 1003);
    assert_eq!(file.get_array(7).unwrap(), &EclArray::Mess);
}

#[test]
fn formatted_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CASE.FINIT");

    let mut output = EclOutput::create(&path).unwrap();
    assert!(output.is_formatted());
    write_case(&mut output);
    output.close().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(" 'INTEHEAD'         411 'INTE'\n"));
    assert!(text.contains(" 'TIME    '           3 'DOUB'\n   0.00000000000000D+00   0.31000000000000D+02   0.59000000000000D+02\n"));
    assert!(text.contains("  T  F  T\n"));
    assert!(text.contains(" 'PROD1   ' 'INJ1    ' '        '\n"));

    let mut file = EclFile::open(&path).unwrap();
    assert!(file.is_formatted());
    assert_eq!(file.len(), 8);

    file.load_data().unwrap();
    assert_eq!(file.get_named::<f32>("PORV").unwrap()[1], 0.5);
    assert_eq!(file.get_named::<f64>("TIME").unwrap(), [0.0, 31.0, 59.0]);
    assert_eq!(file.get_named::<String>("ZWEL").unwrap(), ["PROD1", "INJ1", ""]);
}

#[test]
fn both_encodings_agree() {
    let mut binary = EclOutput::new(Vec::new(), false);
    write_case(&mut binary);
    let mut formatted = EclOutput::new(Vec::new(), true);
    write_case(&mut formatted);

    let mut binary = EclFile::from_mem(binary.into_inner().unwrap(), false).unwrap();
    let mut formatted = EclFile::from_mem(formatted.into_inner().unwrap(), true).unwrap();
    binary.load_data().unwrap();
    formatted.load_data().unwrap();

    assert_eq!(binary.list(), formatted.list());
    for index in 0..binary.len() {
        assert_eq!(
            binary.get_array(index).unwrap(),
            formatted.get_array(index).unwrap()
        );
    }
}

#[test]
fn caller_driven_sequence() {
    let mut output = EclOutput::new(Vec::new(), false);
    output.write("LOGIHEAD", &[true, true]).unwrap();
    let data = output.into_inner().unwrap();

    let mut parser = Parser::new(&data);
    let header = read_binary_header(&mut parser).unwrap();
    assert_eq!(header.name, "LOGIHEAD");
    assert_eq!(header.array_type().unwrap(), ArrayType::Logi);
    assert!(!is_eof(&parser));

    let values = read_binary_logi_array(&mut parser, &header.name, header.count).unwrap();
    assert_eq!(values, [true, true]);
    assert!(is_eof(&parser));
}

// ============================================================================
// Failure scenarios
// ============================================================================

#[test]
fn bad_binary_header_marker() {
    let mut data = Vec::new();
    data.extend_from_slice(&8_i32.to_be_bytes());
    data.extend_from_slice(b"INTEHEAD");
    data.extend_from_slice(&1_i32.to_be_bytes());
    data.extend_from_slice(b"INTE");
    data.extend_from_slice(&16_i32.to_be_bytes());

    let mut parser = Parser::new(&data);
    assert!(matches!(
        read_binary_header(&mut parser),
        Err(Error::Framing { .. })
    ));
    assert!(matches!(
        EclFile::from_mem(data, false),
        Err(Error::Framing { .. })
    ));
}

#[test]
fn bad_logical_word() {
    let mut data = Vec::new();
    data.extend_from_slice(&4_i32.to_be_bytes());
    data.extend_from_slice(&1_i32.to_be_bytes());
    data.extend_from_slice(&4_i32.to_be_bytes());

    let result = read_binary_logi_array(&mut Parser::new(&data), "LOGIHEAD", 1);
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[test]
fn char_token_without_leading_apostrophe() {
    let data = b"PROD2    'INJ1    '\n";
    let result = read_formatted_char_array(&mut Parser::new(data), "ZWEL", 2);
    assert!(matches!(result, Err(Error::Malformed { .. })));
}

#[test]
fn header_missing_fourth_apostrophe() {
    let data = b" 'INTEHEAD'           2 'INTE\n";
    let result = read_formatted_header(&mut Parser::new(data));
    assert!(matches!(result, Err(Error::Malformed { .. })));
}

#[test]
fn formatted_request_past_end() {
    let mut output = EclOutput::new(Vec::new(), true);
    output.write("INTEHEAD", &[1_i32, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let data = output.into_inner().unwrap();

    let mut parser = Parser::new(&data);
    let header = read_formatted_header(&mut parser).unwrap();
    let result = read_formatted_inte_array(&mut parser, &header.name, header.count + 10);
    assert!(matches!(result, Err(Error::Malformed { .. })));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        EclFile::open(dir.path().join("NOPE.INIT")),
        Err(Error::FileError(_))
    ));
}

#[test]
fn empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("EMPTY.EGRID");
    fs::write(&path, b"").unwrap();
    assert!(matches!(EclFile::open(&path), Err(Error::Empty)));
}

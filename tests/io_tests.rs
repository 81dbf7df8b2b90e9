use ndcsv::{
    from_path, from_path_with_options, from_reader, from_slice, to_path, to_string, to_writer,
    values, Error, LabeledArray, ReadOptions,
};
use std::io::{Cursor, Read};

fn sample() -> LabeledArray {
    LabeledArray::new(vec!["r", "c"], vec![2, 2], values![1.5, 2.5, 3.5, 4.5])
        .unwrap()
        .with_coord("r", values!["r1", "r2"])
        .unwrap()
        .with_coord("c", values!["c1", "c2"])
        .unwrap()
}

#[test]
fn test_str_output() {
    assert_eq!(to_string(&LabeledArray::scalar(1)).unwrap(), "1\n");
}

#[test]
fn test_buf_io() {
    let a = LabeledArray::scalar(1);
    let mut buf = Vec::new();
    to_writer(&mut buf, &a).unwrap();
    assert_eq!(buf, b"1\n");
    assert_eq!(from_reader(Cursor::new(&buf)).unwrap(), a);
    assert_eq!(from_slice(&buf).unwrap(), a);
}

#[test]
fn test_file_io() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["test.csv", "test.csv.gz", "test.csv.bz2", "test.csv.xz"] {
        let path = dir.path().join(name);
        to_path(&path, &LabeledArray::scalar(1)).unwrap();
        assert_eq!(from_path(&path).unwrap(), LabeledArray::scalar(1), "{}", name);

        let a = sample();
        to_path(&path, &a).unwrap();
        assert_eq!(from_path(&path).unwrap(), a, "{}", name);
    }
}

#[test]
fn test_compressed_content() {
    let dir = tempfile::tempdir().unwrap();

    let gz = dir.path().join("test.csv.gz");
    to_path(&gz, &LabeledArray::scalar(1)).unwrap();
    let mut text = String::new();
    flate2::read::GzDecoder::new(std::fs::File::open(&gz).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "1\n");

    let xz = dir.path().join("test.csv.xz");
    to_path(&xz, &LabeledArray::scalar(1)).unwrap();
    let mut text = String::new();
    liblzma::read::XzDecoder::new(std::fs::File::open(&xz).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "1\n");
}

#[test]
fn test_bz2_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.csv.bz2");
    to_path(&path, &sample()).unwrap();

    let mut text = String::new();
    bzip2::read::BzDecoder::new(std::fs::File::open(&path).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, to_string(&sample()).unwrap());

    std::fs::write(&path, b"not bzip2").unwrap();
    assert!(matches!(from_path(&path), Err(Error::Io(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = from_path(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_failed_encode_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    let a = LabeledArray::from_vec("x", values![1])
        .with_coord("x", values![""])
        .unwrap();
    assert!(to_path(&path, &a).is_err());
    assert!(!path.exists());
}

#[test]
fn test_path_options() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stacked.csv");
    std::fs::write(&path, "r,c,\n10,30,1\n10,40,2\n").unwrap();
    let a = from_path_with_options(&path, ReadOptions::new().with_unstack(false)).unwrap();
    assert_eq!(a.dims(), ["dim_0"]);
    let a = from_path(&path).unwrap();
    assert_eq!(a.dims(), ["r", "c"]);
}

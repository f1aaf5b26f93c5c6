use anyhow::Result;
use csvsplit::io::csv::{split_in_memory, split_streaming};
use csvsplit::testing::*;
use csvsplit::*;
use std::fs;

const TRICKY: &str = "name,note\n\
\"Smith, Jane\",\"line one\nline two\"\n\
plain,\"has \"\"quotes\"\"\"\n\
empty,\n\
last,row\n";

#[test]
fn read_table_keeps_header_and_rows() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_csv_text(tmp.path(), "t.csv", TRICKY)?;

    let table = read_table(&path, &CsvFormat::default())?;
    assert_eq!(table.len(), 4);
    assert_eq!(table.headers.as_ref().map(|h| h.len()), Some(2));
    assert_eq!(&table.rows[0][0], b"Smith, Jane");
    assert_eq!(&table.rows[0][1], b"line one\nline two");
    assert_eq!(&table.rows[1][1], b"has \"quotes\"");
    assert_eq!(&table.rows[2][1], b"");
    Ok(())
}

#[test]
fn streaming_and_in_memory_write_identical_bytes() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = write_csv_text(tmp.path(), "tricky.csv", TRICKY)?;
    let stream_dir = tmp.path().join("stream");
    let memory_dir = tmp.path().join("memory");
    fs::create_dir_all(&stream_dir)?;
    fs::create_dir_all(&memory_dir)?;

    let cfg = SplitConfig::default().chunk_size(3);
    let streamed = split_streaming(&input, &stream_dir, &cfg)?;
    let loaded = split_in_memory(&input, &memory_dir, &cfg)?;

    assert_eq!(streamed.len(), 2);
    assert_eq!(loaded.len(), 2);
    for (s, m) in streamed.iter().zip(&loaded) {
        assert_eq!(s.rows, m.rows);
        assert_eq!(s.path.file_name(), m.path.file_name());
        assert_eq!(fs::read(&s.path)?, fs::read(&m.path)?);
    }

    let (headers, rows) = read_chunk(&streamed[0].path)?;
    assert_eq!(headers, vec!["name", "note"]);
    assert_eq!(rows[0], vec!["Smith, Jane", "line one\nline two"]);
    Ok(())
}

#[test]
fn headerless_input_writes_headerless_chunks() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = write_csv_text(tmp.path(), "raw.csv", "1,a\n2,b\n3,c\n")?;

    let cfg = SplitConfig::default().chunk_size(2).has_headers(false);
    let chunks = split_streaming(&input, tmp.path(), &cfg)?;

    assert_eq!(chunks.len(), 2);
    assert_eq!(fs::read_to_string(&chunks[0].path)?, "1,a\n2,b\n");
    assert_eq!(fs::read_to_string(&chunks[1].path)?, "3,c\n");
    Ok(())
}

#[test]
fn custom_delimiter_is_preserved() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = write_csv_text(tmp.path(), "semi.csv", "a;b\n1;x,y\n2;z\n")?;

    let cfg = SplitConfig::default().chunk_size(1).delimiter(b';');
    let chunks = split_in_memory(&input, tmp.path(), &cfg)?;

    assert_eq!(chunks.len(), 2);
    assert_eq!(fs::read_to_string(&chunks[0].path)?, "a;b\n1;x,y\n");
    assert_eq!(fs::read_to_string(&chunks[1].path)?, "a;b\n2;z\n");
    Ok(())
}

#[test]
fn write_chunk_overwrites_existing_file() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let target = write_csv_text(tmp.path(), "x_output_file_1.csv", "stale contents\n")?;

    let table = read_table(
        write_csv_text(tmp.path(), "x.csv", "k,v\n1,2\n")?,
        &CsvFormat::default(),
    )?;
    let report = write_chunk(&target, &CsvFormat::default(), table.headers.as_ref(), table.slice(0..1))?;

    assert_eq!(report.rows, 1);
    assert_eq!(fs::read_to_string(&target)?, "k,v\n1,2\n");
    Ok(())
}

#[test]
fn chunk_file_names_follow_input_stem_and_prefix() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let input = write_numbered_csv(tmp.path(), "Report.2024.CSV", 5)?;
    let out = tmp.path().join("out");
    fs::create_dir_all(&out)?;

    let cfg = SplitConfig::default().chunk_size(2).prefix("batch");
    split_streaming(&input, &out, &cfg)?;

    assert_eq!(
        list_file_names(&out)?,
        vec!["Report.2024_batch_1.csv", "Report.2024_batch_2.csv", "Report.2024_batch_3.csv"]
    );
    Ok(())
}

#[test]
fn headerless_short_rows_follow_first_row_width() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = write_csv_text(tmp.path(), "raw.csv", "1,a,x\n2\n3,b\n")?;

    let format = CsvFormat {
        has_headers: false,
        ..CsvFormat::default()
    };
    let table = read_table(&path, &format)?;
    assert!(table.headers.is_none());
    assert!(table.rows.iter().all(|r| r.len() == 3));
    assert_eq!(&table.rows[1][1], b"");

    let too_wide = write_csv_text(tmp.path(), "wide.csv", "1,a\n2,b,c\n")?;
    let err = read_table(&too_wide, &format).unwrap_err();
    assert!(format!("{err:#}").contains("expected 2 fields, found 3"));
    Ok(())
}

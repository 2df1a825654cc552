use super::*;

use csv::{ByteRecord, QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use std::path::PathBuf;
use tracing::{debug, warn};

const DELIMITER: u8 = b';';
const FIELDS_PER_RECORD: usize = 3;

/// Flat file storage: one `name;phone;email` line per contact, no header,
/// no quoting.
///
/// A field that itself contains `;` is written as is and comes back as a
/// malformed line on the next load.
pub struct CsvStorage {
    pub medium: String,
    pub path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            medium: "csv".to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }
}

fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// failing the whole file.
fn parse_record(record: &ByteRecord) -> Result<Contact, MalformedRecord> {
    let fields: Vec<String> = record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();

    let [name, phone, email] =
        <[String; FIELDS_PER_RECORD]>::try_from(fields).map_err(|fields| MalformedRecord {
            line: record.position().map_or(0, |pos| pos.line()),
            fields: fields.len(),
            content: fields.join(";"),
        })?;

    Ok(Contact { name, phone, email })
}

impl ContactStore for CsvStorage {
    fn get_medium(&self) -> &str {
        &self.medium
    }

    fn load(&self) -> Result<Loaded, AppError> {
        if !fs::exists(&self.path)? {
            return Err(AppError::FileNotFound(self.path.clone()));
        }

        // The reader's default terminator accepts \n, \r\n and \r alike
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_path(&self.path)?;

        let mut loaded = Loaded::default();
        for result in reader.byte_records() {
            let record = result?;

            match parse_record(&record) {
                Ok(contact) => loaded.contacts.push(contact),
                Err(malformed) => {
                    warn!(path = %self.path.display(), "skipping malformed {}", malformed);
                    loaded.skipped.push(malformed);
                }
            }
        }

        debug!(
            path = %self.path.display(),
            contacts = loaded.contacts.len(),
            "read contact file"
        );
        Ok(loaded)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        create_file_parent(&self.path)?;

        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(line_terminator())
            .from_path(&self.path)?;

        for contact in contacts {
            writer.serialize(contact)?;
        }

        writer.flush()?;

        debug!(path = %self.path.display(), contacts = contacts.len(), "wrote contact file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> Vec<Contact> {
        vec![
            Contact {
                name: "Uche".to_string(),
                phone: "012345678901".to_string(),
                email: "ucheuche@gmail.com".to_string(),
            },
            Contact {
                name: "Mom".to_string(),
                phone: "+44 7700 900123".to_string(),
                email: "mom@home.net".to_string(),
            },
        ]
    }

    #[test]
    fn check_serialized_file_layout() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");

        CsvStorage::new(&path).save(&sample())?;

        let expected = if cfg!(windows) {
            "Uche;012345678901;ucheuche@gmail.com\r\nMom;+44 7700 900123;mom@home.net\r\n"
        } else {
            "Uche;012345678901;ucheuche@gmail.com\nMom;+44 7700 900123;mom@home.net\n"
        };
        assert_eq!(fs::read_to_string(&path)?, expected);
        Ok(())
    }

    #[test]
    fn save_truncates_previous_content() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        let storage = CsvStorage::new(&path);

        storage.save(&sample())?;
        storage.save(&sample()[1..])?;

        assert_eq!(storage.load()?.contacts, sample()[1..].to_vec());
        Ok(())
    }

    #[test]
    fn save_creates_missing_parent_directories() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join(".instance").join("nested").join("contacts.csv");

        CsvStorage::new(&path).save(&sample())?;

        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn save_into_a_directory_is_an_io_error() -> Result<(), AppError> {
        let dir = tempdir()?;

        let err = CsvStorage::new(dir.path()).save(&sample()).unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
        Ok(())
    }

    #[test]
    fn fields_are_not_quoted() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        let contacts = vec![Contact {
            name: "O'Neil, \"Jr\"".to_string(),
            phone: "0800".to_string(),
            email: "oneil@example.com".to_string(),
        }];

        let storage = CsvStorage::new(&path);
        storage.save(&contacts)?;

        assert!(fs::read_to_string(&path)?.starts_with("O'Neil, \"Jr\";0800;"));
        assert_eq!(storage.load()?.contacts, contacts);
        Ok(())
    }

    #[test]
    fn load_accepts_any_line_ending() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        fs::write(&path, "A;1;a@x.com\r\nB;2;b@x.com\rC;3;c@x.com\nD;4;d@x.com")?;

        let loaded = CsvStorage::new(&path).load()?;

        let names: Vec<&str> = loaded.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D"]);
        assert_eq!(loaded.contacts[3].email, "d@x.com");
        Ok(())
    }

    #[test]
    fn load_reports_malformed_lines() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            "OnlyOneField\nUche;0800;uche@gmail.com\nToo;many;fields;here\n",
        )?;

        let loaded = CsvStorage::new(&path).load()?;

        assert_eq!(loaded.contacts.len(), 1);
        assert_eq!(
            loaded.skipped,
            vec![
                MalformedRecord {
                    line: 1,
                    fields: 1,
                    content: "OnlyOneField".to_string(),
                },
                MalformedRecord {
                    line: 3,
                    fields: 4,
                    content: "Too;many;fields;here".to_string(),
                },
            ]
        );
        assert_eq!(
            loaded.skipped[1].to_string(),
            "line 3: expected 3 fields, found 4: 'Too;many;fields;here'"
        );
        Ok(())
    }

    #[test]
    fn embedded_delimiter_breaks_the_record() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        let storage = CsvStorage::new(&path);

        storage.save(&[Contact {
            name: "Semi;Colon".to_string(),
            phone: "0800".to_string(),
            email: "semi@example.com".to_string(),
        }])?;
        let loaded = storage.load()?;

        assert!(loaded.contacts.is_empty());
        assert_eq!(loaded.skipped[0].fields, 4);
        Ok(())
    }

    #[test]
    fn undecodable_line_does_not_stop_the_load() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            b"Uche;0800;uche@gmail.com\nJos\xe9;0900;jose@x.com\nAlex;0700;alex@x.com\n",
        )?;

        let loaded = CsvStorage::new(&path).load()?;

        let names: Vec<&str> = loaded.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Uche", "Jos\u{FFFD}", "Alex"]);
        assert_eq!(loaded.contacts[1].email, "jose@x.com");
        assert!(loaded.skipped.is_empty());
        Ok(())
    }

    #[test]
    fn path_that_cannot_be_checked_is_an_io_error() -> Result<(), AppError> {
        let dir = tempdir()?;
        let file = dir.path().join("plain.txt");
        fs::write(&file, "not a directory")?;

        let err = CsvStorage::new(file.join("contacts.csv")).load().unwrap_err();

        assert!(matches!(err, AppError::Io(_)), "got {err:?}");
        Ok(())
    }

    #[test]
    fn load_missing_file() {
        let err = CsvStorage::new("/nonexistent/path").load().unwrap_err();

        assert!(matches!(err, AppError::FileNotFound(p) if p == PathBuf::from("/nonexistent/path")));
    }

    #[test]
    fn empty_file_loads_nothing() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("contacts.csv");
        fs::write(&path, "")?;

        let loaded = CsvStorage::new(&path).load()?;

        assert!(loaded.contacts.is_empty());
        assert!(loaded.skipped.is_empty());
        Ok(())
    }
}

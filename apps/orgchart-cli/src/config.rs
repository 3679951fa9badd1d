use anyhow::{Result, anyhow};
use orgchart::{DEFAULT_DEPARTMENT_LABEL, IdGenerator};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub id_strategy: IdGenerator,
    pub default_department: String,
    pub csv_delimiter: u8,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let id_strategy = match lookup("ORGCHART_ID_STRATEGY") {
            Some(raw) => raw
                .parse::<IdGenerator>()
                .map_err(|err| anyhow!("invalid ORGCHART_ID_STRATEGY: {err}"))?,
            None => IdGenerator::default(),
        };

        let default_department = lookup("ORGCHART_DEFAULT_DEPARTMENT")
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT_LABEL.into());

        let csv_delimiter = match lookup("ORGCHART_CSV_DELIMITER") {
            Some(raw) => parse_delimiter(&raw)?,
            None => b',',
        };

        Ok(Self {
            id_strategy,
            default_department,
            csv_delimiter,
        })
    }
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ if raw == "\\t" => Ok(b'\t'),
        _ => Err(anyhow!(
            "ORGCHART_CSV_DELIMITER must be a single ASCII character, got {raw:?}"
        )),
    }
}

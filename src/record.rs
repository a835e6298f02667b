/// One observation: the temperature of a city on a given day.
///
/// `date` is kept as the literal `dd/MM/yyyy` string it was entered with,
/// lookups by exact date compare it byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub city: String,
    pub date: String,
    pub temperature: f64,
}

impl Record {
    pub fn new(city: impl Into<String>, date: impl Into<String>, temperature: f64) -> Self {
        Self {
            city: city.into(),
            date: date.into(),
            temperature,
        }
    }
}

/// A row of the editable grid. Any cell may be unset while the user is
/// still typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub city: Option<String>,
    pub date: Option<String>,
    pub temperature: Option<String>,
}

impl Row {
    /// A row with every cell set.
    pub fn new(
        city: impl Into<String>,
        date: impl Into<String>,
        temperature: impl Into<String>,
    ) -> Self {
        Self {
            city: Some(city.into()),
            date: Some(date.into()),
            temperature: Some(temperature.into()),
        }
    }

    /// Turns the row back into a record, `None` if a cell is unset or blank
    /// or if the temperature isn't a number.
    pub fn to_record(&self) -> Option<Record> {
        let city = filled(self.city.as_deref())?;
        let date = filled(self.date.as_deref())?;
        let temperature = self.temperature.as_deref()?.trim().parse().ok()?;

        Some(Record::new(city, date, temperature))
    }
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        Self::new(
            record.city.clone(),
            record.date.clone(),
            record.temperature.to_string(),
        )
    }
}

fn filled(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|cell| !cell.is_empty())
}

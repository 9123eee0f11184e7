use std::io::Write;

use anyhow::Result;

use crate::record::IpoRecord;

pub const HEADER: [&str; 5] = ["会社名", "銘柄コード", "抽選申込開始", "抽選申込終了", "当選発表"];

/// Streams CSV rows, flushing after each so output appears as pages finish.
pub struct CsvOutput<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvOutput<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(out),
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(HEADER)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &IpoRecord) -> Result<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::IpoSchedule;

    fn record(name: &str) -> IpoRecord {
        IpoRecord {
            url: "u".into(),
            company_name: name.into(),
            stock_code: "5588".into(),
            schedule: IpoSchedule::default(),
        }
    }

    #[test]
    fn header_then_rows() {
        let mut buf = Vec::new();
        {
            let mut out = CsvOutput::new(&mut buf);
            out.write_header().unwrap();
            out.write_record(&record("サクラテック")).unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "会社名,銘柄コード,抽選申込開始,抽選申込終了,当選発表\n\
             サクラテック,5588,0001/01/01,0001/01/01,0001/01/01\n"
        );
    }

    #[test]
    fn comma_in_name_is_quoted() {
        let mut buf = Vec::new();
        {
            let mut out = CsvOutput::new(&mut buf);
            out.write_record(&record("A,B \"C\"")).unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\"A,B \"\"C\"\"\",5588,0001/01/01,0001/01/01,0001/01/01\n"
        );
    }
}

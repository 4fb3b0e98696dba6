//! Tab-separated dump of a sample table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::info;

use crate::error::Result;
use crate::numerics::Variate;
use crate::sampling::table::SampleTable;
use crate::sampling::SamplingManager;

/// Default file name of [`write_to_file`] in the front end.
pub const DEFAULT_PATH: &str = "random_samples.tsv";

/// One line per row, name row first, cells separated by tabs.
pub fn write_tsv<T: Variate>(table: &SampleTable<T>, mut out: impl Write) -> io::Result<()> {
    for row in table.iter_rows() {
        writeln!(out, "{}", row.iter().join("\t"))?;
    }
    out.flush()
}

/// Write the last table generated by `sampler` to `path`, replacing any previous contents.
pub fn write_to_file(sampler: &dyn SamplingManager, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    sampler.write_table(&mut out)?;
    let (rows, columns) = sampler.table_shape();
    info!(path = %path.display(), rows, columns, family = sampler.name(), "wrote sample table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use itertools::Itertools;
    use rand::distributions::Uniform;

    use super::{write_to_file, write_tsv};
    use crate::distribution::discrete::Bernoulli;
    use crate::distribution::Parameters;
    use crate::sampling::table::SampleTable;
    use crate::sampling::{Sampler, SamplingManager};

    #[test]
    fn one_line_per_row() {
        let mut table = SampleTable::default();
        table.generate(&Uniform::new(0_f32, 1.), 3, 2).unwrap();
        let mut out = Vec::new();
        write_tsv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with('\n'));
        let lines = text.lines().collect_vec();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1\t2\tsum\tmean\ttts\tvariance1\tvariance2");
        for line in &lines[1..] {
            let cells = line.split('\t').collect_vec();
            assert_eq!(cells.len(), 7);
            // Six decimals, as many as an f32 carries.
            assert!(cells.iter().all(|c| c.split_once('.').unwrap().1.len() == 6));
        }
    }

    #[test]
    fn file_is_truncated() {
        let path = std::env::temp_dir().join(format!("random_samples_{}.tsv", std::process::id()));
        fs::write(&path, "stale contents that are longer than the table\n".repeat(100)).unwrap();

        let mut sampler = Sampler::<Bernoulli>::new();
        sampler.set_parameters(Parameters::Probability(1.)).unwrap();
        sampler.set_sampler_config(2, 3).unwrap();
        sampler.generate_samples().unwrap();
        write_to_file(&sampler, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(
            text.lines().collect_vec(),
            [
                "1\t2\t3\tsum\tmean\ttts\tvariance1\tvariance2",
                "1\t1\t1\t3.000000\t1.000000\t0.000000\t0.000000\t0.000000",
                "1\t1\t1\t3.000000\t1.000000\t0.000000\t0.000000\t0.000000",
            ]
        );
    }
}

//! Text and JSON rendering of analysis results.

use crate::sampler::NodeStatistic;
use crate::tables::RoleTables;
use ndarray::Array2;
use std::fmt::Display;
use std::io::{Result, Write};

/// Report file name for one fusion root's descendant tree
pub fn descendants_file_name(root: u64, sample_exponent: u32) -> String {
    format!(
        "fusion{}-descendants-sample10power{}.txt",
        root, sample_exponent
    )
}

/// Write one line per node of an analyzed tree.
///
/// Probabilities print with `sample_exponent` fixed-point digits, matching
/// the sampler's resolution.
pub fn write_descendants<W: Write>(
    writer: &mut W,
    stats: &[NodeStatistic],
    sample_exponent: u32,
) -> Result<()> {
    let precision = sample_exponent as usize;
    for node in stats {
        writeln!(
            writer,
            "node: {},  type: {},  prob: {:.prec$},  depth: {:.2}, children: {}",
            node.id,
            node.birth_type,
            node.probability,
            node.average_depth,
            node.num_children,
            prec = precision,
        )?;
    }
    Ok(())
}

/// Write an analyzed tree as pretty-printed JSON
pub fn write_descendants_json<W: Write>(writer: &mut W, stats: &[NodeStatistic]) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write one contingency table as tab-separated values
pub fn write_table<W: Write, T: Display>(
    writer: &mut W,
    title: &str,
    table: &Array2<T>,
    row_label: &str,
    col_label: &str,
) -> Result<()> {
    writeln!(writer, "{}", title)?;
    writeln!(writer)?;

    write!(writer, "{} \\ {}", row_label, col_label)?;
    for col in 0..table.ncols() {
        write!(writer, "\t{}", col)?;
    }
    writeln!(writer)?;

    for row in 0..table.nrows() {
        write!(writer, "{}", row)?;
        for col in 0..table.ncols() {
            write!(writer, "\t{}", table[[row, col]])?;
        }
        writeln!(writer)?;
    }
    writeln!(writer)?;

    Ok(())
}

/// Write the twelve role tables (count, sum, average, percent for each of
/// the three role splits) under a report header.
pub fn write_role_tables<W: Write>(
    writer: &mut W,
    report_title: &str,
    tables: &RoleTables,
) -> Result<()> {
    writeln!(writer, "\n\n{}\n", report_title)?;
    writeln!(writer, "Sample size = {}\n", tables.samples())?;

    let samples = tables.samples();
    let fmt_f64 = |table: &Array2<f64>| table.mapv(|v| format!("{:.4}", v));

    write_table(
        writer,
        "Management Count: counts of managers and workers",
        &tables.management.count,
        "managers",
        "workers",
    )?;
    write_table(
        writer,
        "Management Sum: sums of growths of managers and workers",
        &tables.management.sum,
        "managers",
        "workers",
    )?;
    write_table(
        writer,
        "Management Average: averages of growths of managers and workers",
        &fmt_f64(&tables.management.averages()),
        "managers",
        "workers",
    )?;
    write_table(
        writer,
        "Management Percent: percents of managers and workers",
        &fmt_f64(&tables.management.percentages(samples)),
        "managers",
        "workers",
    )?;

    write_table(
        writer,
        "Mutualism Count: counts of insiders and outsiders",
        &tables.mutualism.count,
        "outsiders",
        "insiders",
    )?;
    write_table(
        writer,
        "Mutualism Sum: sums of growths of insiders and outsiders",
        &tables.mutualism.sum,
        "outsiders",
        "insiders",
    )?;
    write_table(
        writer,
        "Mutualism Average: averages of insiders and outsiders",
        &fmt_f64(&tables.mutualism.averages()),
        "outsiders",
        "insiders",
    )?;
    write_table(
        writer,
        "Mutualism Percent: percents of insiders and outsiders",
        &fmt_f64(&tables.mutualism.percentages(samples)),
        "outsiders",
        "insiders",
    )?;

    write_table(
        writer,
        "Interaction Count: counts of soloists and ensembles",
        &tables.interaction.count,
        "soloists",
        "ensembles",
    )?;
    write_table(
        writer,
        "Interaction Sum: sums of growths of soloists and ensembles",
        &tables.interaction.sum,
        "soloists",
        "ensembles",
    )?;
    write_table(
        writer,
        "Interaction Average: averages of soloists and ensembles",
        &fmt_f64(&tables.interaction.averages()),
        "soloists",
        "ensembles",
    )?;
    write_table(
        writer,
        "Interaction Percent: percents of soloists and ensembles",
        &fmt_f64(&tables.interaction.percentages(samples)),
        "soloists",
        "ensembles",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{BirthType, SeedRoles};

    fn sample_stats() -> Vec<NodeStatistic> {
        vec![
            NodeStatistic {
                id: 2,
                birth_type: BirthType::Fusion,
                probability: 1.0,
                average_depth: 1.5,
                num_children: 2,
            },
            NodeStatistic {
                id: 3,
                birth_type: BirthType::Asexual,
                probability: 0.5,
                average_depth: 2.0,
                num_children: 0,
            },
        ]
    }

    #[test]
    fn test_descendants_line_format() {
        let mut out = Vec::new();
        write_descendants(&mut out, &sample_stats(), 6).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "node: 2,  type: fusion,  prob: 1.000000,  depth: 1.50, children: 2"
        );
        assert_eq!(
            lines.next().unwrap(),
            "node: 3,  type: asexual,  prob: 0.500000,  depth: 2.00, children: 0"
        );
    }

    #[test]
    fn test_probability_precision_tracks_exponent() {
        let mut out = Vec::new();
        write_descendants(&mut out, &sample_stats()[1..], 2).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("prob: 0.50,"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            descendants_file_name(2181, 6),
            "fusion2181-descendants-sample10power6.txt"
        );
    }

    #[test]
    fn test_json_export() {
        let mut out = Vec::new();
        write_descendants_json(&mut out, &sample_stats()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"id\": 2"));
        assert!(text.contains("\"birth_type\": \"fusion\""));
    }

    #[test]
    fn test_role_tables_report() {
        let mut tables = RoleTables::new(2);
        tables.record(&SeedRoles {
            managers: 1,
            workers: 2,
            manager_growth: 5,
            worker_growth: 5,
            ..Default::default()
        });

        let mut out = Vec::new();
        write_role_tables(&mut out, "Fusion Tables Prolific", &tables).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Fusion Tables Prolific"));
        assert!(text.contains("Sample size = 1"));
        assert!(text.contains("Management Count: counts of managers and workers"));
        assert!(text.contains("managers \\ workers\t0\t1\t2"));
        assert!(text.contains("Interaction Percent: percents of soloists and ensembles"));
        // Row 1 of the management count table holds the sample at [1, 2]
        assert!(text.contains("1\t0\t0\t1"));
    }
}

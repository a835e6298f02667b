use temperaturas::workbook::Workbook;

fn main() -> miette::Result<()> {
    env_logger::init();

    let file = std::env::args().nth(1).expect("Missing filename");
    println!("opening {file}");

    let mut workbook = Workbook::new();
    let summary = workbook.open(&file)?;
    println!(
        "{} records loaded, {} lines skipped",
        summary.loaded, summary.skipped
    );

    let store = workbook.store();
    if !store.is_empty() {
        println!(
            "Mean temp of the file: {:.1}",
            store.iter().map(|record| record.temperature).sum::<f64>() / store.len() as f64
        );
    }

    Ok(())
}

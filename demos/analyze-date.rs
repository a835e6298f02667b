use temperaturas::workbook::Workbook;

fn main() -> miette::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let file = args.next().expect("Missing filename");
    let date = args.next().expect("Missing date (dd/MM/yyyy)");

    let mut workbook = Workbook::new();
    workbook.open(&file)?;

    match workbook.analyze_date(&date)? {
        Some(extremes) => println!("{extremes}"),
        None => println!("No hay datos para la fecha {date}"),
    }

    Ok(())
}

use plotters::prelude::*;
use temperaturas::workbook::Workbook;

fn main() -> miette::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().expect("Missing filename");
    let start = args.next().expect("Missing start date (dd/MM/yyyy)");
    let end = args.next().expect("Missing end date (dd/MM/yyyy)");
    println!("opening {input}");
    let output = format!("{input}.png");

    let mut workbook = Workbook::new();
    workbook.open(&input)?;

    let Some(averages) = workbook.average_by_city(&start, &end)? else {
        println!("No hay datos disponibles en el rango de fechas seleccionado.");
        return Ok(());
    };
    let cities: Vec<(&str, f64)> = averages.iter().collect();

    // Bars start at zero, keep it on the axis for negative means too
    let range = averages.range();
    let low = range.start.min(0.0);
    let high = range.end.max(0.0) + 1.0;

    let root = BitMapBackend::new(&output, (1920, 1080)).into_drawing_area();
    root.fill(&WHITE).unwrap();
    let mut chart = ChartBuilder::on(&root)
        .caption(averages.title(), ("sans-serif", 50).into_font())
        .margin(5)
        .x_label_area_size(80)
        .y_label_area_size(80)
        .build_cartesian_2d((0..cities.len()).into_segmented(), low..high)
        .unwrap();

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Ciudad")
        .y_desc("Temperatura (°C)")
        .x_labels(cities.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) => cities
                .get(*index)
                .map(|(city, _)| city.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .unwrap();

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(RGBColor(255, 100, 100).filled())
                .margin(20)
                .data(
                    cities
                        .iter()
                        .enumerate()
                        .map(|(index, (_, mean))| (index, *mean)),
                ),
        )
        .unwrap();

    root.present().unwrap();
    println!("wrote {output}");

    Ok(())
}

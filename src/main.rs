mod args;
mod config;
mod reader;

use ecsv::Result;

fn main() -> Result {
    let args = args::parse_input_args()?;

    config::configure_app(&args)?;

    log::debug!("Application configured with {args:?}. Beginning inspection...");

    let (delimiter, mut rdr) = reader::build_row_reader(&args)?;
    println!("delimiter: {:?}", delimiter as char);

    match rdr.get_headers()? {
        Some(headers) => println!("headers: {}", headers.join(", ")),
        None => println!("headers: none"),
    }

    for row in rdr.rows() {
        let row = row?;
        log::debug!("Read row: {row:?}");
    }

    println!("rows: {}", rdr.line_number());

    log::debug!("Application finished successfully!");

    Ok(())
}

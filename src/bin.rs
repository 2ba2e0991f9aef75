/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
use clap::Parser;
use orbit_light::RunConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Inputs {
    /// The JSON file describing the orbit, the surface and what to calculate
    #[arg(short, long)]
    input: String,

    /// Where to write the resulting time series. If not given, it is
    /// written to the standard output
    #[arg(short, long)]
    output: Option<String>,
}

fn run(args: Inputs) -> orbit_light::Result<()> {
    let config = RunConfig::from_file(&args.input)?;
    let series = config.run()?;
    log::info!("Calculated {} steps", series.len());

    let json = serde_json::to_string_pretty(&series)?;
    match args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Inputs::parse();
    let input_file = args.input.clone();

    if let Err(e) = run(args) {
        eprintln!("Error while processing '{}': {}", input_file, e);
        std::process::exit(1);
    }
}

extern crate clap;
use crossbeam_channel::{bounded, Receiver}; // Stop requests from the signal handler
use env_logger;
use log::{error, info};

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use pifm_core::constants::audio::DEFAULT_BANDWIDTH;
use pifm_core::{ModulationParameters, ModulationSummary, RegisterBus, Transmitter};
use pifm_peripherals::{DevMemWindow, PifmError, Result, Teardown, TeardownGuard, WavSamples};

/// Validated command line
#[derive(Debug)]
struct Options {
    wav_path: PathBuf,
    params: ModulationParameters,
}

/// Configures command-line interface using clap
fn get_cli_config<'a, 'b>() -> clap::App<'a, 'b> {
    let description = "FM transmitter on GPIO 4 driven by the general purpose clock";
    clap::App::new("pifm")
        .version("0.1")
        .about(description)
        .setting(clap::AppSettings::AllowNegativeNumbers)
        .arg(
            clap::Arg::with_name("wavfile")
                .help("Audio to broadcast, 16 bit 22.050kHz mono")
                .required(true)
                .index(1),
        )
        .arg(
            clap::Arg::with_name("freq")
                .help("Carrier frequency in MHz")
                .required(true)
                .index(2),
        )
        .arg(
            clap::Arg::with_name("power")
                .help("Bandwidth scale, defaults to 25")
                .index(3),
        )
        .after_help("Power will default to 25 if not specified. It should only be lowered!")
}

fn parse_number(matches: &clap::ArgMatches, name: &'static str) -> Result<f32> {
    let value = matches.value_of_lossy(name).unwrap_or_default();
    match value.trim().parse::<f32>() {
        Ok(number) => Ok(number),
        Err(_) => Err(PifmError::InvalidNumber {
            name,
            value: value.into_owned(),
        }),
    }
}

/// Parses the command line; `None` means usage was printed and nothing should run
fn parse_args<I, T>(args: I) -> Result<Option<Options>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match get_cli_config().get_matches_from_safe(args) {
        Ok(matches) => matches,
        Err(e) => {
            if e.use_stderr() {
                eprintln!("{}", e.message);
            } else {
                println!("{}", e.message);
            }
            return Ok(None);
        }
    };

    let frequency = parse_number(&matches, "freq")?;
    let bandwidth = if matches.is_present("power") {
        parse_number(&matches, "power")?
    } else {
        DEFAULT_BANDWIDTH
    };

    Ok(Some(Options {
        wav_path: matches
            .value_of_os("wavfile")
            .map(PathBuf::from)
            .unwrap_or_default(),
        params: ModulationParameters::new(frequency, bandwidth)?,
    }))
}

/// SIGINT/SIGTERM: first request stops the sample loop, a second one tears down directly
fn install_termination_handler<B>(teardown: Arc<Teardown<B>>) -> Result<Receiver<()>>
where
    B: RegisterBus + Send + Sync + 'static,
{
    let (stop_sender, stop_receiver) = bounded(1);
    ctrlc::set_handler(move || {
        if stop_sender.is_full() {
            // Main loop has not picked up the first request yet
            if teardown.shut_down() {
                std::process::exit(0);
            }
            return;
        }
        let _send_result = stop_sender.send(());
    })
    .map_err(|e| PifmError::SignalHandler(e.to_string()))?;

    Ok(stop_receiver)
}

/// Switches the carrier on and plays `samples` until they run out or a stop arrives
fn broadcast<B, I>(
    bus: &B,
    params: &ModulationParameters,
    samples: I,
    stop: &Receiver<()>,
) -> ModulationSummary
where
    B: RegisterBus,
    I: IntoIterator<Item = i16>,
{
    let transmitter = Transmitter::new(bus);
    transmitter.configure_clock_output(true);
    transmitter.write_divisor(params.center_divisor()); // carrier on frequency before audio

    transmitter.run_modulation(samples, params, || !stop.is_empty())
}

fn run<I, T, B, F>(args: I, acquire: F) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    B: RegisterBus + Send + Sync + 'static,
    F: FnOnce() -> Result<B>,
{
    // Nothing below touches hardware until the arguments and audio file check out
    let options = match parse_args(args)? {
        Some(options) => options,
        None => return Ok(()),
    };
    let samples = WavSamples::open(&options.wav_path)?;

    let bus = Arc::new(acquire()?);
    let teardown = Arc::new(Teardown::new(Arc::clone(&bus)));
    let _guard = TeardownGuard::new(Arc::clone(&teardown));
    let stop = install_termination_handler(Arc::clone(&teardown))?;

    let params = options.params;
    info!(
        "Setting up modulation: {} MHz / {} @ {}",
        params.frequency(),
        params.center_divisor(),
        params.bandwidth()
    );
    info!("Now broadcasting: {}", options.wav_path.display());

    let summary = broadcast(&*bus, &params, samples, &stop);
    if summary.interrupted {
        info!("Stopped after {} samples", summary.samples_sent);
    } else {
        info!("Finished after {} samples", summary.samples_sent);
    }

    teardown.shut_down();
    Ok(())
}

/// Main entry point for the transmitter
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(std::env::args_os(), DevMemWindow::acquire) {
        error!("{}", e);
        std::process::exit(1);
    }
}

use std::env;
use std::error::Error;

use labinstrument::{Hittite, Keithley2280, YigFilter};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut args = env::args().skip(1);
    match (args.next().as_deref(), args.next()) {
        (Some("hittite"), Some(host)) => poke_hittite(&host),
        (Some("keithley"), Some(host)) => poke_keithley(&host),
        (Some("yig"), Some(host)) => tune_yig(&host, args.next()),
        _ => {
            eprintln!("usage: labinstrument <hittite|keithley|yig> <host> [freq-ghz]");
            Ok(())
        }
    }
}

fn poke_hittite(host: &str) -> Result<(), Box<dyn Error>> {
    let mut sg = Hittite::connect(host)?;
    sg.link().send_raw("*IDN?")?;
    println!("{}", sg.link().receive_raw()?);
    println!("frequency: {} GHz", sg.get_frequency("GHz")?);
    println!("power: {} dBm", sg.get_power()?);
    sg.close();
    Ok(())
}

fn poke_keithley(host: &str) -> Result<(), Box<dyn Error>> {
    let mut supply = Keithley2280::connect(host)?;
    println!("{}", supply.get_id()?);
    println!("voltage: {} V", supply.get_voltage()?);
    println!("current: {} A", supply.get_current()?);
    supply.close()?;
    Ok(())
}

fn tune_yig(host: &str, freq_ghz: Option<String>) -> Result<(), Box<dyn Error>> {
    let ghz: f64 = match freq_ghz {
        Some(s) => s.parse()?,
        None => 5.0,
    };
    let mut filter = YigFilter::connect(host)?;
    filter.set_frequency(ghz, "GHz")?;
    println!("tuned to {} GHz", ghz);
    filter.close();
    Ok(())
}

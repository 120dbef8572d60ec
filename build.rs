use std::{env, fs, path::PathBuf};

/// Oscillator frequency when `PIC24_FOSC_HZ` is unset
const DEFAULT_FOSC_HZ: u32 = 32_000_000;

fn main() {
    println!("cargo:rerun-if-env-changed=PIC24_FOSC_HZ");

    let fosc_hz = match env::var("PIC24_FOSC_HZ") {
        Ok(value) => {
            let digits: String = value.trim().chars().filter(|&c| c != '_').collect();
            digits.parse::<u32>().unwrap_or_else(|err| {
                panic!("PIC24_FOSC_HZ={:?} is not a frequency in Hz: {}", value, err)
            })
        }
        Err(env::VarError::NotPresent) => DEFAULT_FOSC_HZ,
        Err(err) => panic!("Cannot read PIC24_FOSC_HZ: {}", err),
    };
    assert!(fosc_hz >= 2, "PIC24_FOSC_HZ must be at least 2Hz");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let config = format!(
        "/// Oscillator frequency (FOSC) in Hz\npub const FOSC_HZ: u32 = {};\n",
        fosc_hz
    );
    fs::write(out_dir.join("config.rs"), config).expect("Cannot write config.rs");
}

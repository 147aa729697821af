//! Soft-AP bring-up utility for ESP32.
//!
//! Brings up an access point with compile-time credentials:
//!   AP_SSID="MyAP" AP_PSK="secret123" cargo run --bin softap
//!
//! Leave AP_PSK unset (or empty) for an open network. AP_CHANNEL pins a
//! channel in 1-14; without it the radio picks one.

/// AP SSID - set via AP_SSID environment variable at compile time.
#[cfg(feature = "esp32")]
const AP_SSID: Option<&str> = option_env!("AP_SSID");

/// Pre-shared key - set via AP_PSK environment variable at compile time.
/// Empty for an open network.
#[cfg(feature = "esp32")]
const AP_PSK: Option<&str> = option_env!("AP_PSK");

/// Optional fixed channel - set via AP_CHANNEL at compile time.
#[cfg(feature = "esp32")]
const AP_CHANNEL: Option<&str> = option_env!("AP_CHANNEL");

/// Print error message and halt. Pauses briefly so the serial output is
/// flushed before the process exits (espflash monitor will show it).
#[cfg(feature = "esp32")]
fn halt_with_error(msg: &str) -> ! {
    eprintln!("\n{}", msg);
    eprintln!("\n=== Soft-AP bring-up failed ===\n");
    std::thread::sleep(std::time::Duration::from_secs(2));
    std::process::exit(1);
}

#[cfg(feature = "esp32")]
fn main() {
    use esp32_wifi::config::{ApSettings, AuthMethod};
    use esp32_wifi::wifi::{AccessPoint, EspApRadio};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;

    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    println!("\n=== Soft-AP Utility ===\n");

    let ssid = match AP_SSID {
        Some(s) if !s.is_empty() => s,
        _ => {
            halt_with_error(
                "Error: AP_SSID environment variable not set at compile time.\n\n\
                 Usage:\n  \
                 AP_SSID=\"MyAP\" AP_PSK=\"secret123\" cargo run --bin softap\n\n\
                 For an open network:\n  \
                 AP_SSID=\"MyAP\" cargo run --bin softap",
            );
        }
    };
    let psk = AP_PSK.unwrap_or("");

    let mut options = ApSettings::default();
    options.ssid = Some(ssid.to_string());
    if !psk.is_empty() {
        options.encryption.method = Some(AuthMethod::Wpa2Psk.code());
        options.encryption.psk = Some(psk.to_string());
    }
    if let Some(raw) = AP_CHANNEL {
        match raw.parse::<i64>() {
            Ok(channel) => options.channel = Some(channel.into()),
            Err(_) => halt_with_error("Error: AP_CHANNEL must be an integer"),
        }
    }

    println!("SSID: {}", ssid);
    println!(
        "PSK: {} ({} chars)",
        if psk.is_empty() { "(open)" } else { "****" },
        psk.len()
    );

    let peripherals = match Peripherals::take() {
        Ok(p) => p,
        Err(e) => halt_with_error(&format!("Error taking peripherals: {:?}", e)),
    };
    let sysloop = match EspSystemEventLoop::take() {
        Ok(s) => s,
        Err(e) => halt_with_error(&format!("Error taking system event loop: {:?}", e)),
    };
    let radio = match EspApRadio::new(peripherals.modem, sysloop) {
        Ok(r) => r,
        Err(e) => halt_with_error(&format!("Error initializing WiFi: {:?}", e)),
    };

    let mut ap = AccessPoint::new(radio);
    if let Err(e) = ap.start(&options) {
        halt_with_error(&format!("Error: {}", e));
    }

    match ap.radio().ip() {
        Some(ip) => println!("\n=== Access point up at {} ===\n", ip),
        None => println!("\n=== Access point up ===\n"),
    }

    // Keep the AP alive; espflash monitor shows driver logs from here on.
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}

#[cfg(not(feature = "esp32"))]
fn main() {
    eprintln!("This binary must be built for ESP32.");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  AP_SSID=\"MyAP\" AP_PSK=\"secret123\" cargo run --bin softap");
    std::process::exit(1);
}

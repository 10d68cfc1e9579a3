use std::env;

fn main() {
    // Read WiFly association defaults from environment variables (optional)
    // These are baked into WifiCredentials::from_build_env()

    // WiFi SSID (network name)
    if let Ok(ssid) = env::var("WIFI_SSID") {
        println!("cargo:rustc-env=WIFI_SSID={}", ssid);
        println!("cargo:warning=Using WIFI_SSID from environment: {}", ssid);
    } else {
        println!("cargo:rustc-env=WIFI_SSID=");
    }

    // WiFi passphrase
    if let Ok(password) = env::var("WIFI_PASSWORD") {
        println!("cargo:rustc-env=WIFI_PASSWORD={}", password);
        println!("cargo:warning=Using WIFI_PASSWORD from environment (hidden)");
    } else {
        println!("cargo:rustc-env=WIFI_PASSWORD=");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
}

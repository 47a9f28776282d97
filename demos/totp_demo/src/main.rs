use std::time::SystemTime;

use ferrotp::{secret, totp::Totp};

pub fn main() -> anyhow::Result<()> {
    // Enroll: mint a fresh shared secret for the account
    let shared = secret::generate(secret::DEFAULT_SECRET_LENGTH)?;

    // Initialize the TOTP with the defaults (SHA1 hash, 6-digits and 30 seconds period)
    let totp = Totp::new(shared.clone());

    // Calculate time since Unix Epoch
    let now = SystemTime::now();
    let time_since_epoch = now.duration_since(SystemTime::UNIX_EPOCH)?;

    // Generate the code with the seconds
    let code = totp.generate(time_since_epoch.as_secs())?;

    // The URI is what a QR renderer would turn into a scannable image
    let uri = totp.to_uri("demo@example.com", Some("Ferrotp Demo"))?;

    println!("Secret: {shared}");
    println!(
        "Code: {}, Remaining time: {}",
        code,
        totp.remaining_seconds(time_since_epoch.as_secs())
    );
    println!("Provisioning URI: {uri}");

    Ok(())
}

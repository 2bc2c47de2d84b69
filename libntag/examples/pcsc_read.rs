// Read one NTAG21x tag on the first PC/SC reader (ACR122U or similar).
//
// Usage: cargo run --example pcsc_read --features pcsc -- [password]

use libntag::prelude::*;
use libntag::transport::PcscTransport;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let password = std::env::args().nth(1).unwrap_or_default();
    let config = ReaderConfig::default().with_password(password.as_str());
    config.validate()?;

    let transport = PcscTransport::new()?;
    println!("readers: {:?}", transport.list_readers()?);
    println!("Place a tag on the reader...");

    // The reader applies the configured transceive timeout to the tag.
    let tag = Ntag21x::new(transport, config.max_pages_per_transfer);
    let outcome = TagReader::new(config).read(Box::new(tag));

    println!("{}", outcome.to_message().to_json()?);
    Ok(())
}

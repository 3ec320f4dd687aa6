//! # MediCare Storefront Entry Point
//!
//! Reads one JSON command per line from stdin and writes one JSON response
//! per line to stdout. Logs go to stderr.
//!
//! ```text
//! $ echo '{"command":"browse_products","search":"vitamin"}' | medicare-storefront
//! {"ok":true,"data":{"products":[...],"total":4,"hasActiveFilters":true},"notices":[]}
//! ```

fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = medicare_storefront_lib::run() {
        eprintln!("medicare-storefront: {}", e);
        std::process::exit(1);
    }
}

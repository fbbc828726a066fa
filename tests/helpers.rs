// Shared fixtures for integration tests: a scripted DNS world, a WHOIS
// gateway that never answers, and a report buffer the test can read back.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fakedomain::whois::parse_whois;
use fakedomain::{StaticDns, WhoisError, WhoisGateway, WhoisRecord};

/// DNS world used across tests.
///
/// - `temp.io`, `trash.io` share `mx.temp.io` (10.0.0.1)
/// - `burner.net` has its own server on the same address as `mx.temp.io`
/// - `gmail.com` and `googlemail.com` share `mx.gmail.com`
/// - `mixed.org` uses both `mx.temp.io` and `mx.gmail.com`
/// - `self.net` has no MX but resolves itself
/// - `dead.com` has no MX and does not resolve
/// - `ghost.com` has an MX that does not resolve
#[allow(dead_code)]
pub fn fixture_dns() -> StaticDns {
    StaticDns::new()
        .with_mx("temp.io", &["mx.temp.io."])
        .with_mx("trash.io", &["MX.Temp.IO"])
        .with_mx("burner.net", &["mx.burner.net"])
        .with_mx("gmail.com", &["mx.gmail.com"])
        .with_mx("googlemail.com", &["mx.gmail.com"])
        .with_mx("mixed.org", &["mx.temp.io", "mx.gmail.com"])
        .with_mx("ghost.com", &["mx.ghost.com"])
        .with_addresses("mx.temp.io", &["10.0.0.1"])
        .with_addresses("mx.burner.net", &["10.0.0.1"])
        .with_addresses("mx.gmail.com", &["192.0.2.10", "192.0.2.11"])
        .with_addresses("self.net", &["198.51.100.5"])
}

/// WHOIS gateway that fails every query.
#[allow(dead_code)]
pub struct NoWhois;

impl WhoisGateway for NoWhois {
    async fn lookup(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
        Err(WhoisError::Timeout {
            domain: domain.to_string(),
        })
    }
}

/// WHOIS gateway that answers every domain with the same registrant.
#[allow(dead_code)]
pub struct RegistrantWhois(pub &'static str);

impl WhoisGateway for RegistrantWhois {
    async fn lookup(&self, _domain: &str) -> Result<WhoisRecord, WhoisError> {
        Ok(parse_whois(&format!(
            "Domain Name: EXAMPLE.COM\nRegistrant Organization: {}\n",
            self.0
        )))
    }
}

/// Report sink whose content stays readable after the session took it.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

#[allow(dead_code)]
impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("report is UTF-8")
    }

    pub fn boxed(&self) -> Box<dyn Write> {
        Box::new(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes a batch file into `dir` and returns its path as a string.
#[allow(dead_code)]
pub fn write_batch(dir: &Path, name: &str, lines: &[&str]) -> String {
    let path: PathBuf = dir.join(name);
    std::fs::write(&path, lines.join("\n")).expect("Failed to write batch file");
    path.to_string_lossy().into_owned()
}

/// Chain arguments from a whitespace-separated line.
#[allow(dead_code)]
pub fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

//! Local name advertisement.
//!
//! While the device waits for authorization it publishes `<name>.local` so a
//! browser on the same network segment can reach the callback server without
//! knowing the device's address. Advertisement is best-effort: when it fails
//! the flow continues and the user has to type the raw address instead.

use mdns_sd::{ServiceDaemon, ServiceInfo};

use crate::{
    debug,
    error::{Error, Result},
    info, warning,
};

const SERVICE_TYPE: &str = "_http._tcp.local.";

/// Publishes and withdraws a local host name.
///
/// `start` on an active advertiser restarts it and `stop` on an inactive one
/// does nothing.
pub trait NameAdvertiser {
    fn start(&mut self, name: &str, port: u16) -> Result<()>;
    fn stop(&mut self);
    fn is_active(&self) -> bool;
}

/// Multicast DNS advertiser.
#[derive(Default)]
pub struct MdnsAdvertiser {
    active: Option<(ServiceDaemon, String)>,
}

impl MdnsAdvertiser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NameAdvertiser for MdnsAdvertiser {
    fn start(&mut self, name: &str, port: u16) -> Result<()> {
        self.stop();

        let daemon = ServiceDaemon::new().map_err(|e| Error::Advertise(e.to_string()))?;
        let host_name = format!("{name}.local.");
        let service = ServiceInfo::new(SERVICE_TYPE, name, &host_name, "", port, &[("path", "/")][..])
            .map_err(|e| Error::Advertise(e.to_string()))?
            .enable_addr_auto();
        let fullname = service.get_fullname().to_string();

        if let Err(e) = daemon.register(service) {
            let _ = daemon.shutdown();
            return Err(Error::Advertise(e.to_string()));
        }

        info!("MDNS responder started for node name '{}'.", name);
        self.active = Some((daemon, fullname));
        Ok(())
    }

    fn stop(&mut self) {
        let Some((daemon, fullname)) = self.active.take() else {
            return;
        };

        debug!("Stopping MDNS responder for '{}'", fullname);
        if let Err(e) = daemon.unregister(&fullname) {
            warning!("Failed to withdraw '{}': {}", fullname, e);
        }
        if let Err(e) = daemon.shutdown() {
            warning!("Failed to shut down MDNS responder: {}", e);
        }
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for MdnsAdvertiser {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut advertiser = MdnsAdvertiser::new();
        advertiser.stop();
        advertiser.stop();
        assert!(!advertiser.is_active());
    }
}

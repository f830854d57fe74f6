#![allow(dead_code)]

use std::{
    cell::RefCell,
    net::{SocketAddr, TcpListener},
    time::Duration,
};

use spotremote::{
    discovery::NameAdvertiser,
    error::{Error, Result},
    progress::ProgressSink,
    spotify::FlowOptions,
};

/// Advertiser that records calls instead of touching the network.
#[derive(Debug, Default)]
pub struct FakeAdvertiser {
    pub fail: bool,
    pub starts: Vec<(String, u16)>,
    pub stops: usize,
    active: bool,
}

impl FakeAdvertiser {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl NameAdvertiser for FakeAdvertiser {
    fn start(&mut self, name: &str, port: u16) -> Result<()> {
        self.starts.push((name.to_string(), port));
        if self.fail {
            return Err(Error::Advertise("multicast unavailable".to_string()));
        }
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Progress sink that keeps every update.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub reports: RefCell<Vec<(String, u8)>>,
    pub notes: RefCell<Vec<String>>,
}

impl ProgressSink for RecordingProgress {
    fn report(&self, text: &str, percentage: u8) {
        self.reports.borrow_mut().push((text.to_string(), percentage));
    }

    fn note(&self, text: &str) {
        self.notes.borrow_mut().push(text.to_string());
    }
}

/// A loopback address with a port that was free a moment ago.
pub fn free_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn flow_options(addr: SocketAddr, timeout: Duration) -> FlowOptions {
    FlowOptions {
        node_name: "tp-spotify".to_string(),
        server_address: addr,
        authorize_url: "https://accounts.spotify.com/authorize?client_id=id".to_string(),
        timeout,
    }
}

/// Issues a GET, retrying while the server is not listening yet.
pub async fn get_when_up(url: String) -> reqwest::Response {
    for _ in 0..200 {
        if let Ok(res) = reqwest::get(&url).await {
            return res;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {url} never answered");
}

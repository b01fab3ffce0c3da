use log::debug;
use std::process::Command;

use crate::error::InventoryError;
use crate::hardware::types::Platform;

/// Virtual or generic adapter names dropped when `exclude_extra` is set.
pub const ADAPTER_DENYLIST: [&str; 5] = ["WAN", "RAS", "TAP", "TAP-Windows", "Generic"];

/// One management query: a property of a component on a node.
#[derive(Debug, Clone, Copy)]
pub struct QueryRequest<'a> {
    pub component: &'a str,
    pub property: &'a str,
    pub exclude_extra: bool,
    pub node: Option<&'a str>,
}

/// Executes management queries and returns their raw text output.
///
/// The property header line is never part of the returned text.
pub trait QueryTransport {
    fn query(&self, request: &QueryRequest<'_>) -> Result<String, InventoryError>;
}

impl<T: QueryTransport + ?Sized> QueryTransport for Box<T> {
    fn query(&self, request: &QueryRequest<'_>) -> Result<String, InventoryError> {
        (**self).query(request)
    }
}

/// Pick the transport for a platform.
pub fn select_transport(platform: &Platform, debug: bool) -> Box<dyn QueryTransport> {
    if platform.supports_management_queries() {
        Box::new(WmicTransport::new(debug))
    } else {
        Box::new(UnavailableTransport::new(platform.clone()))
    }
}

/// Drop lines containing the property name, and the adapter denylist when
/// requested. Matching is case-insensitive substring matching.
pub fn filter_output(raw: &str, property: &str, exclude_extra: bool) -> String {
    let mut needles = vec![property.to_lowercase()];
    if exclude_extra {
        needles.extend(ADAPTER_DENYLIST.iter().map(|term| term.to_lowercase()));
    }

    raw.split_inclusive('\n')
        .filter(|line| {
            let lower = line.to_lowercase();
            !needles.iter().any(|needle| lower.contains(needle.as_str()))
        })
        .collect()
}

/// Decode query output, honouring a UTF-16LE byte-order mark.
pub fn decode_output(bytes: &[u8]) -> Result<String, String> {
    if let Some(body) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let pairs = body.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(format!("truncated UTF-16 output: {} bytes after the byte-order mark", body.len()));
        }
        let units: Vec<u16> = pairs.map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
        return String::from_utf16(&units).map_err(|e| format!("invalid UTF-16 output: {}", e));
    }
    String::from_utf8(bytes.to_vec()).map_err(|e| format!("invalid UTF-8 output: {}", e))
}

/// Runs queries through the `wmic` command-line tool.
pub struct WmicTransport {
    debug: bool,
}

impl WmicTransport {
    pub fn new(debug: bool) -> Self {
        WmicTransport { debug }
    }

    fn build_command(&self, request: &QueryRequest<'_>) -> Command {
        let mut cmd = Command::new("wmic");
        if let Some(node) = request.node {
            push_node_switch(&mut cmd, node);
        }
        cmd.args(request.component.split_whitespace())
            .arg("GET")
            .arg(request.property);
        cmd
    }
}

#[cfg(windows)]
fn push_node_switch(cmd: &mut Command, node: &str) {
    use std::os::windows::process::CommandExt;
    cmd.raw_arg(format!("/NODE:\"{}\"", node));
}

#[cfg(not(windows))]
fn push_node_switch(cmd: &mut Command, node: &str) {
    cmd.arg(format!("/NODE:\"{}\"", node));
}

impl QueryTransport for WmicTransport {
    fn query(&self, request: &QueryRequest<'_>) -> Result<String, InventoryError> {
        let failure = |reason: String| InventoryError::transport(request.component, request.property, reason);

        let mut cmd = self.build_command(request);
        debug!("running {:?}", cmd);

        let output = cmd.output().map_err(|e| failure(format!("could not start wmic: {}", e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(format!("wmic exited with {}: {}", output.status, stderr.trim())));
        }

        let text = decode_output(&output.stdout).map_err(failure)?;
        let value = filter_output(&text, request.property, request.exclude_extra);

        if self.debug {
            println!("{:?}", cmd);
            println!("{}", value);
        }
        Ok(value)
    }
}

/// Strategy for platforms without management instrumentation.
pub struct UnavailableTransport {
    platform: Platform,
}

impl UnavailableTransport {
    pub fn new(platform: Platform) -> Self {
        UnavailableTransport { platform }
    }
}

impl QueryTransport for UnavailableTransport {
    fn query(&self, _request: &QueryRequest<'_>) -> Result<String, InventoryError> {
        Err(InventoryError::UnsupportedPlatform(self.platform.to_string()))
    }
}

//! Stable per-cluster node colours.

/// Hue for a cluster name, stable across sessions and uploads.
///
/// Rolling `h * 31 + c` hash over UTF-16 units where the shifted term wraps
/// at 32 bits and the running sum does not.
pub fn cluster_hue(cluster: &str) -> u32 {
	let hash = cluster.encode_utf16().fold(0i64, |h, c| {
		let shifted = i64::from((h as i32).wrapping_shl(5));
		i64::from(c) + shifted - h
	});
	(hash.unsigned_abs() % 360) as u32
}

/// CSS colour of a cluster.
pub fn cluster_color(cluster: &str) -> String {
	format!("hsl({}, 70%, 50%)", cluster_hue(cluster))
}

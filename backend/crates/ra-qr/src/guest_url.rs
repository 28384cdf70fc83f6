/// Build `{base_url}/guest/{room_id}?data={encoded_payload}`.
///
/// `room_id` is repeated in the path so the guest app can route before the
/// payload has been validated. `encoded_payload` must already be percent-encoded.
pub fn guest_url(base_url: &str, room_id: &str, encoded_payload: &str) -> String {
    format!(
        "{}/guest/{}?data={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(room_id),
        encoded_payload
    )
}

/// Raw (still percent-encoded) value of the `data` parameter in a query string.
///
/// Query extractors decode parameters once already; the codec expects the
/// encoded form, so handlers pull the value out of the raw query instead.
pub fn extract_data_param(raw_query: &str) -> Option<&str> {
    raw_query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "data")
        .map(|(_, value)| value)
}

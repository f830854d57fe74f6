use spotremote::utils::*;

#[test]
fn test_redirect_uri_keeps_trailing_slash() {
    assert_eq!(redirect_uri("tp-spotify", 80), "http://tp-spotify.local/callback/");
    assert_eq!(redirect_uri("tp-spotify", 8080), "http://tp-spotify.local:8080/callback/");
}

#[test]
fn test_landing_url() {
    assert_eq!(landing_url("tp-spotify", 80), "http://tp-spotify.local");
    assert_eq!(landing_url("kitchen", 3000), "http://kitchen.local:3000");
}

#[test]
fn test_authorize_url_encodes_redirect_and_scope() {
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        "client123",
        "http://tp-spotify.local/callback/",
        "user-read-playback-state user-modify-playback-state",
    );

    assert_eq!(
        url,
        "https://accounts.spotify.com/authorize?client_id=client123&response_type=code\
&redirect_uri=http%3A%2F%2Ftp-spotify.local%2Fcallback%2F\
&scope=user-read-playback-state%20user-modify-playback-state"
    );
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_redact_hides_most_of_secret() {
    assert_eq!(redact("AQBxyz1234567890"), "AQBxyz…");
    assert_eq!(redact("abc"), "***");
    assert_eq!(redact(""), "");
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(0), "0:00");
    assert_eq!(format_duration_ms(61_500), "1:01");
    assert_eq!(format_duration_ms(3_600_000), "60:00");
}

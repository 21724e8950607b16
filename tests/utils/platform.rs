//! Integration tests for user-agent detection
//!
//! Tests browser family and version detection and platform classification.

use tidbit_utils::{Browser, Platform, browser_version, detect_browser, judge_platform};

const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";
const WINDOWS_PHONE: &str = "Mozilla/5.0 (Mobile; Windows Phone 8.1; Android 4.0; ARM; \
                             Trident/7.0; Touch; rv:11.0; IEMobile/11.0) like iPhone OS 7_0_3 \
                             Mac OS X AppleWebKit/537 (KHTML, like Gecko) Mobile Safari/537";
const IPOD: &str = "Mozilla/5.0 (iPod touch; CPU iPhone OS 12_5 like Mac OS X) AppleWebKit/605.1.15 \
                    (KHTML, like Gecko) Version/12.1.2 Mobile/15E148 Safari/604.1";
const FIREFOX_LINUX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
const IE9: &str = "Mozilla/5.0 (compatible; MSIE 9.0; Windows NT 6.1; Trident/5.0)";
const IE11: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko";

// =============================================================================
// Browsers
// =============================================================================

#[test]
fn chrome_on_android() {
    assert_eq!(detect_browser(ANDROID_CHROME), Browser::Chrome);
    assert_eq!(browser_version(ANDROID_CHROME), "chrome");
}

#[test]
fn firefox() {
    assert_eq!(browser_version(FIREFOX_LINUX), "firefox");
}

#[test]
fn internet_explorer() {
    assert_eq!(browser_version(IE9), "ie9");
    assert_eq!(browser_version(IE11), "ie11");
    assert_eq!(detect_browser(IE11), Browser::Ie(Some(11)));
}

#[test]
fn detection_is_case_insensitive() {
    assert_eq!(browser_version(&IE9.to_uppercase()), "ie9");
    assert_eq!(browser_version("FIREFOX/1.0"), "firefox");
}

#[test]
fn unknown_browser_is_empty() {
    assert_eq!(browser_version("Wget/1.21"), "");
    assert_eq!(detect_browser("Wget/1.21"), Browser::Unknown);
}

// =============================================================================
// Platforms
// =============================================================================

#[test]
fn mobile_agents() {
    for ua in [ANDROID_CHROME, WINDOWS_PHONE, IPOD] {
        assert_eq!(judge_platform(ua), Platform::Mobile, "{ua}");
    }
}

#[test]
fn desktop_agents() {
    for ua in [FIREFOX_LINUX, IE9, IE11] {
        assert_eq!(judge_platform(ua), Platform::Pc, "{ua}");
    }
    assert_eq!(Platform::Pc.to_string(), "pc");
}

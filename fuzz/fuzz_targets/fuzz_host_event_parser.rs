#![no_main]

use formkit_web::parse_host_event;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Must never panic; errors are fine.
    if let Ok(Some(formkit_web::HostEvent::Layout(layout))) = parse_host_event(json) {
        assert!(layout.len() <= json.len());
    }
});

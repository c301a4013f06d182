#![no_main]

use eclio::EclFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for formatted in [false, true] {
        if let Ok(mut file) = EclFile::from_mem(data.to_vec(), formatted) {
            let _ = file.load_data();
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use wise::domain::ports::TemplateContext;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let ctx = TemplateContext::new().with("project_name", "acme");
        let _ = wise::infrastructure::templates::substitute("fuzz", source, &ctx);
    }
});

use fieldscan::{MaskDirective, Record, Scan};

#[derive(Scan)]
struct Credentials {
    #[secret]
    pub bare: String,
    #[secret(redact)]
    pub redact: String,
    #[secret(mask = 4)]
    pub mask_int: String,
    #[secret(mask = "4")]
    pub mask_str: String,
    #[secret(mask)]
    pub mask_all: String,
    #[secret = "mask=2"]
    pub tagged: String,
    #[secret(custom)]
    pub custom: String,
}

fn main() {
    let value = || "abcdef".to_string();
    let creds = Credentials {
        bare: value(),
        redact: value(),
        mask_int: value(),
        mask_str: value(),
        mask_all: value(),
        tagged: value(),
        custom: value(),
    };
    assert_eq!(
        creds.scan(),
        "bare=REDACTED | redact=REDACTED | mask_int=XXcdef | mask_str=XXcdef | \
         mask_all=XXXXXX | tagged=XXXXef | custom=abcdef"
    );
    let directives: Vec<_> = creds
        .fields()
        .iter()
        .map(|field| field.shape().directive())
        .collect();
    assert_eq!(directives[6], Some(MaskDirective::Unrecognized("custom")));
}

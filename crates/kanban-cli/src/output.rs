use serde::Serialize;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Envelope for every JSON line the CLI prints.
#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> CliResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            api_version: API_VERSION,
            data: Some(data),
            error: None,
        }
    }

    fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"success":false,"api_version":"{}","error":"failed to encode response: {}"}}"#,
                API_VERSION, e
            )
        })
    }
}

impl CliResponse<()> {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            api_version: API_VERSION,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

pub fn output_success<T: Serialize>(data: T) {
    println!("{}", CliResponse::ok(data).to_line());
}

pub fn output_list<T: Serialize>(items: Vec<T>) {
    let count = items.len();
    output_success(ListResponse { items, count });
}

/// Prints an error response to stderr and exits with code 1.
pub fn output_error(message: &str) -> ! {
    eprintln!("{}", CliResponse::failure(message).to_line());
    std::process::exit(1);
}

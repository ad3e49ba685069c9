//! Prompt construction
//!
//! Every prompt is a pure function of its inputs so identical endpoints always
//! produce identical requests.

use serde_json::Value;

use crate::spec::ParsedEndpoint;

pub const CATEGORY_SYSTEM: &str =
    "You are a helpful assistant that identifies the main resource an API operation acts upon.";

pub fn category(tags: &[String], summary: &str, description: &str) -> String {
    format!(
        "Given the following API operation details, provide a single, concise resource name \
that this operation acts upon. The resource name should be in plural form and use Title Case \
(e.g., \"Food Items\" instead of \"Food Item\" or \"food item\").\n\n\
Tags: {}\nSummary: {}\nDescription: {}\n\nResource Name:",
        tags.join(", "),
        summary,
        description
    )
}

pub fn title(method: &str, path: &str, summary: &str) -> String {
    format!(
        "Given this API operation: Method: {}, Path: {}, Summary: {}, generate a concise and \
descriptive title for the documentation page. Reply with the title only.",
        method.to_ascii_uppercase(),
        path,
        summary
    )
}

pub fn introduction(api_title: Option<&str>, tone: &str) -> String {
    let subject = api_title
        .map(|t| format!("the {} API", t))
        .unwrap_or_else(|| "an API".to_string());
    format!(
        "Generate an introduction for the documentation of {}. Include:\n\
1. A brief overview of the API's purpose and capabilities\n\
2. Key features of the API\n\
3. How to navigate the documentation\n\
4. Any important notes or considerations for users\n\n\
Use markdown formatting and a {} tone. The output should be concise yet informative.",
        subject, tone
    )
}

pub fn resource_overview(category: &str, endpoints: &[ParsedEndpoint], tone: &str) -> String {
    let listing = endpoints
        .iter()
        .map(|e| {
            if e.summary.is_empty() {
                format!("- {} {}", e.method, e.path)
            } else {
                format!("- {} {}: {}", e.method, e.path, e.summary)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate an overview for the {category} API. Include:\n\
1. A brief description of what {category} represents in the system.\n\
2. A list of available endpoints for {category}, with a short description for each.\n\
3. Any important notes or considerations for using the {category} API.\n\n\
Endpoints:\n{listing}\n\n\
Use markdown formatting and a {tone} tone. The output should be concise yet informative."
    )
}

pub fn endpoint(endpoint: &ParsedEndpoint, tone: &str) -> String {
    let parameters = pretty(&Value::Array(endpoint.parameters.clone()));
    let request_body = endpoint
        .request_body
        .as_ref()
        .map(pretty)
        .unwrap_or_else(|| "None".to_string());
    let responses = pretty(&Value::Object(endpoint.responses.clone()));

    format!(
        "Generate clear and concise documentation for the following API endpoint:\n\n\
Method: {method}\nPath: {path}\nSummary: {summary}\nDescription: {description}\n\n\
Parameters: {parameters}\nRequest Body: {request_body}\nResponses: {responses}\n\n\
Please provide a detailed explanation of the endpoint, including its purpose, required \
parameters, request format, and possible responses. Start with the heading \
`# {method} {path}`. Use a {tone} tone. Do not include any information that is not \
explicitly stated in the provided details.",
        method = endpoint.method,
        path = endpoint.path,
        summary = endpoint.summary,
        description = endpoint.description,
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

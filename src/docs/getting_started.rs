//! Static getting-started pages, identical on every run

/// `(file name, navigation title, contents)` in index order
pub const PAGES: [(&str, &str, &str); 4] = [
    ("README.md", "Getting Started", README),
    ("installation.md", "Installation", INSTALLATION),
    ("authentication.md", "Authentication", AUTHENTICATION),
    ("making-requests.md", "Making Requests", MAKING_REQUESTS),
];

pub const DIR: &str = "getting-started";

const README: &str = r#"# Getting Started

Welcome to our API documentation! This section will guide you through the process of setting up and using our API.

## Contents

1. [Installation](installation.md): Set up your development environment.
2. [Authentication](authentication.md): Learn how to authenticate your API requests.
3. [Making Requests](making-requests.md): Understand how to structure and send API requests.

Let's get started with integrating our API into your application!
"#;

const INSTALLATION: &str = r#"# Installation

This guide will help you set up your development environment to use our API.

## Prerequisites

- A modern web browser
- An HTTP client (like cURL or Postman) for testing API requests
- Your preferred programming language and development environment

## Getting Your API Key

1. Sign up for an account on our developer portal
2. Navigate to the API Keys section
3. Generate a new API key
4. Store your API key securely - you'll need it for all API requests

## Next Steps

Once you have your API key, proceed to the [Authentication](authentication.md) guide to learn how to use it in your requests.
"#;

const AUTHENTICATION: &str = r#"# Authentication

Our API uses API keys for authentication. You must include your API key in every request to authenticate.

## Using Your API Key

Include your API key in the Authorization header of your HTTP requests:

```
Authorization: Bearer YOUR_API_KEY
```

Replace `YOUR_API_KEY` with the actual API key you obtained from our developer portal.

## Security Best Practices

- Keep your API key confidential
- Don't hardcode your API key in your source code
- Use environment variables or a secure key management system to store your API key
- Rotate your API key periodically

## Next Steps

Now that you understand how to authenticate your requests, move on to [Making Requests](making-requests.md) to learn how to interact with our API endpoints.
"#;

const MAKING_REQUESTS: &str = r#"# Making Requests

This guide explains how to structure and send requests to our API.

## Base URL

All API requests should be made to:

```
https://api.example.com/v1
```

## Request Format

Our API accepts JSON-encoded request bodies. Set the following headers for your requests:

- `Content-Type: application/json`
- `Authorization: Bearer YOUR_API_KEY`

## Common HTTP Methods

- GET: Retrieve resources
- POST: Create new resources
- PUT: Update existing resources
- DELETE: Remove resources

## Example Request

Here's an example of how to make a GET request to retrieve a list of items:

```bash
curl -H "Authorization: Bearer YOUR_API_KEY" https://api.example.com/v1/items
```

## Handling Responses

Our API returns JSON-encoded responses. Always check the HTTP status code to determine the outcome of your request.

## Rate Limiting

Check the `X-RateLimit-Remaining` header in the API response to monitor your current rate limit status.

## Next Steps

Explore the API Reference section for detailed information on all available endpoints and operations.
"#;

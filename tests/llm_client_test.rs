//! LLM 客户端测试
//!
//! 用一次性的本地 HTTP 服务模拟 OpenAI 兼容接口：
//! - 健康检查（可用 / 不可达）
//! - 生成请求的格式与响应解析
//! - 错误响应

use cai::config::{LlmProvider, Preferences};
use cai::llm::client::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use cai::llm::{LlmClient, LlmConfig, TextGenerator};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

// ============================================================================
// Mock server
// ============================================================================

/// 接受一个连接，返回固定响应，并把收到的原始请求交还给测试
fn serve_once(status_line: &'static str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });

    (format!("http://{}/v1", addr), handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client_for(base_url: String) -> LlmClient {
    LlmClient::new(LlmConfig {
        base_url,
        timeout_ms: 5000,
        ..LlmConfig::default()
    })
    .unwrap()
}

// ============================================================================
// Config
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:1234/v1");
        assert_eq!(config.model, "default");
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert!((config.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_for_each_provider() {
        for (provider, url) in [
            (LlmProvider::Lmstudio, "http://127.0.0.1:1234/v1"),
            (LlmProvider::Ollama, "http://127.0.0.1:11434/v1"),
            (LlmProvider::Localai, "http://127.0.0.1:8080/v1"),
            (LlmProvider::Textgen, "http://127.0.0.1:5000/v1"),
        ] {
            let prefs = Preferences {
                llm_provider: provider,
                ..Default::default()
            };
            assert_eq!(LlmConfig::from_preferences(&prefs).base_url, url);
        }
    }
}

// ============================================================================
// Health check
// ============================================================================

mod check_tests {
    use super::*;

    #[test]
    fn test_check_running() {
        let (base_url, server) = serve_once("200 OK", r#"{"data":[{"id":"local-model"}]}"#);
        let status = client_for(base_url).check();
        let request = server.join().unwrap();

        assert!(status.running);
        assert!(status.error.is_none());
        assert!(request.starts_with("GET /v1/models"));
    }

    #[test]
    fn test_check_unreachable() {
        // 绑定后立即释放，得到一个无人监听的端口
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base_url = format!("http://127.0.0.1:{}/v1", port);

        let status = client_for(base_url.clone()).check();
        assert!(!status.running);
        assert_eq!(status.error, Some(format!("Cannot connect to {}", base_url)));
    }
}

// ============================================================================
// Generate
// ============================================================================

mod generate_tests {
    use super::*;

    #[test]
    fn test_generate_sends_chat_request() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Bonjour"}}]}"#,
        );
        let client = client_for(base_url);
        let text = client.generate("Translate hello to French").unwrap();
        let request = server.join().unwrap();

        assert_eq!(text, "Bonjour");
        assert!(request.starts_with("POST /v1/chat/completions"));

        let body_start = request.find("\r\n\r\n").unwrap() + 4;
        let body: serde_json::Value = serde_json::from_str(&request[body_start..]).unwrap();
        assert_eq!(body["model"], "default");
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Translate hello to French");
    }

    #[test]
    fn test_generate_through_trait_object() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"A short summary."}}]}"#,
        );
        let client = client_for(base_url);
        let generator: &dyn TextGenerator = &client;
        assert_eq!(generator.generate("Summarize").unwrap(), "A short summary.");
        server.join().unwrap();
    }

    #[test]
    fn test_generate_error_response() {
        let (base_url, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error":{"message":"model not loaded"}}"#,
        );
        let err = client_for(base_url).generate("hi").unwrap_err();
        server.join().unwrap();

        assert_eq!(
            err.to_string(),
            "LLM error (500 Internal Server Error): model not loaded"
        );
    }

    #[test]
    fn test_generate_plain_error_body() {
        let (base_url, server) = serve_once("404 Not Found", "no such route");
        let err = client_for(base_url).generate("hi").unwrap_err();
        server.join().unwrap();

        assert_eq!(err.to_string(), "LLM error (404 Not Found): no such route");
    }

    #[test]
    fn test_generate_empty_choices() {
        let (base_url, server) = serve_once("200 OK", r#"{"choices":[]}"#);
        let err = client_for(base_url).generate("hi").unwrap_err();
        server.join().unwrap();

        assert!(err.to_string().contains("no choices"));
    }
}

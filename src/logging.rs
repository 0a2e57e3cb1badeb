//! tracing 구독자 초기화.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` 이 있으면 그것을, 없으면 설정의 필터 문자열을 사용한다.
/// 로그는 결과 출력과 섞이지 않도록 stderr 로 보낸다.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // 이미 초기화된 경우(테스트 등)는 무시한다.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::{AuthService, InMemoryUserRepository};
use service::auth::domain::{RegisterInput, LoginInput};

fn bench_login(c: &mut Criterion) {
    let svc = AuthService::new(Arc::new(InMemoryUserRepository::new()));

    let rt = tokio::runtime::Runtime::new().unwrap();
    for i in 0..100 {
        let input = RegisterInput { name: format!("Filler {i}"), email: format!("filler{i}@example.com"), password: "Filler1".into() };
        rt.block_on(svc.register(input)).unwrap();
    }
    rt.block_on(svc.register(RegisterInput { name: "Bench".into(), email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            black_box(rt.block_on(svc.login(LoginInput { email: "BENCH@example.com".into(), password: "Benchmark1".into() })).unwrap());
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);

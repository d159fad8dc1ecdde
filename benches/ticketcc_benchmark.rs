use criterion::{criterion_group, criterion_main, Criterion};

use ticketcc::client::Api;
use ticketcc::shim::MockStub;
use ticketcc::{Ticket, TicketContract};

pub fn mock_invoke(c: &mut Criterion) {
    const NUM_CREATE: usize = 100;

    let rt = rt();

    c.bench_function("mock_create_and_query_all", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut stub = MockStub::new("bench");
                for i in 0..NUM_CREATE {
                    let key = format!("TICKET{}", i);
                    stub.mock_invoke(
                        &TicketContract,
                        ["createTicket", key.as_str(), "org", "event", "20180501", "owner"],
                    )
                    .await;
                }
                let response = stub
                    .mock_invoke(&TicketContract, ["queryAllTickets"])
                    .await;
                assert!(response.is_ok());
            });
        });
    });
}

pub fn peer_invoke(c: &mut Criterion) {
    const NUM_CREATE: usize = 10;

    let rt = rt();
    let root_dir = tempfile::tempdir().unwrap();

    let (mut client, _handle) = rt.block_on(async {
        let mut initializer =
            ticketcc::config::Initializer::from_config(ticketcc::config::Config::default());
        initializer.set_root_dir(root_dir.path());
        initializer.init_dir().await.unwrap();
        initializer.launch(TicketContract::new()).await.unwrap()
    });

    c.bench_function("peer_create_ticket", |b| {
        b.iter(|| {
            rt.block_on(async {
                for i in 0..NUM_CREATE {
                    let ticket = Ticket::new("org", "event", "20180501", format!("owner-{}", i));
                    client
                        .create_ticket(&format!("TICKET{}", i), &ticket)
                        .await
                        .unwrap();
                }
            });
        });
    });
}

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

criterion_group!(benches, mock_invoke, peer_invoke);
criterion_main!(benches);

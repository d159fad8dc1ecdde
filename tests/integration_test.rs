use std::path::Path;

use ticketcc::client::{Api, LocalClient};
use ticketcc::config::{Config, Initializer};
use ticketcc::{ErrorKind, Ticket, TicketContract};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

async fn launch(root_dir: &Path) -> (LocalClient, tokio::task::JoinHandle<()>) {
    let mut initializer = Initializer::from_config(Config::default());
    initializer.set_root_dir(root_dir);
    initializer.init_dir().await.unwrap();

    initializer.launch(TicketContract::new()).await.unwrap()
}

async fn shutdown(client: LocalClient, handle: tokio::task::JoinHandle<()>) {
    drop(client);
    handle.await.unwrap();
}

#[test]
fn ticket_lifecycle() {
    init_tracing();

    tokio_test::block_on(async move {
        let root_dir = tempfile::tempdir().unwrap();
        let (mut client, handle) = launch(root_dir.path()).await;

        assert!(client.query_ticket("Ticket0").await.unwrap().is_none());

        client.init_ledger().await.unwrap();
        assert_eq!(
            client.query_ticket("Ticket3").await.unwrap(),
            Some(Ticket::new(
                "BroadwayTheater",
                "BruceSpringsteen",
                "20180715",
                "Varad"
            ))
        );
        for i in 0..6 {
            let key = format!("Ticket{}", i);
            assert!(client.query_ticket(&key).await.unwrap().is_some());
        }

        // Seeded keys fall outside of the upper case scan range.
        assert!(client.query_all_tickets().await.unwrap().is_empty());

        let ticket = Ticket::new("OperaHouse", "Tosca", "2018-06-01", "Ana");
        client.create_ticket("TICKET7", &ticket).await.unwrap();
        client
            .change_ticket_owner("TICKET7", "Bruno")
            .await
            .unwrap();

        let records = client.query_all_tickets().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "TICKET7");
        assert_eq!(
            records[0].record,
            Ticket {
                owner: "Bruno".into(),
                ..ticket.clone()
            }
        );

        let err = client
            .change_ticket_owner("TICKET8", "Bruno")
            .await
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::ChaincodeResponse { status: 500, message } if message == "ticket not found: TICKET8"
        ));

        shutdown(client, handle).await;

        // State survives reopening the ledger.
        let (mut client, handle) = launch(root_dir.path()).await;
        let reopened = client.query_ticket("TICKET7").await.unwrap().unwrap();
        assert_eq!(reopened.owner, "Bruno");
        assert_eq!(reopened.event, "Tosca");
        assert_eq!(
            client.query_ticket("Ticket5").await.unwrap().unwrap().owner,
            "John"
        );

        shutdown(client, handle).await;
    });
}

#[test]
fn query_never_commits() {
    init_tracing();

    tokio_test::block_on(async move {
        let root_dir = tempfile::tempdir().unwrap();
        let (mut client, handle) = launch(root_dir.path()).await;

        let args = ["createTicket", "Ticket9", "a", "b", "c", "d"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let response = client.query(args).await.unwrap();
        assert!(response.is_ok());

        assert!(client.query_ticket("Ticket9").await.unwrap().is_none());

        shutdown(client, handle).await;
    });
}

#[test]
fn error_responses_commit_nothing() {
    init_tracing();

    tokio_test::block_on(async move {
        let root_dir = tempfile::tempdir().unwrap();
        let (mut client, handle) = launch(root_dir.path()).await;

        let response = client
            .invoke(vec!["createTicket".into(), "Ticket9".into()])
            .await
            .unwrap();
        assert!(!response.is_ok());
        assert_eq!(
            response.message,
            "Incorrect number of arguments. Expecting 5"
        );

        let response = client
            .invoke(vec!["transferTicket".into(), "Ticket9".into()])
            .await
            .unwrap();
        assert_eq!(response.message, "Invalid Smart Contract function name.");

        assert!(client.query_ticket("Ticket9").await.unwrap().is_none());

        shutdown(client, handle).await;

        let ledger = root_dir
            .path()
            .join("channels")
            .join("mychannel")
            .join("ticketcc.ledger");
        assert_eq!(std::fs::metadata(ledger).unwrap().len(), 0);
    });
}

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};

use crate::{Error, request::Callback};

/// Serve `router` on a random local port and return its base URL.
pub(crate) async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test server");
    let address = listener
        .local_addr()
        .expect("Could not get test server address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{address}")
}

/// A callback that forwards its result to the returned receiver.
pub(crate) fn callback_channel<T: Send + 'static>()
-> (Callback<T>, oneshot::Receiver<Result<T, Error>>) {
    let (sender, receiver) = oneshot::channel();
    let callback: Callback<T> = Box::new(move |result| {
        let _ = sender.send(result);
    });

    (callback, receiver)
}

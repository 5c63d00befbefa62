pub mod debts;
pub mod health;
pub mod payments;
pub mod returns;

use actix_web::web;

/// Register every preview endpoint under `/v1`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope("/v1")
            .route("/payments/preview", web::post().to(payments::preview_payment))
            .route("/payments/submission", web::post().to(payments::prepare_submission))
            .route("/returns/settlement", web::post().to(returns::project_settlement))
            .route("/returns/preview", web::post().to(returns::preview_return))
            .route("/debts/summary", web::post().to(debts::summarize_debt)),
    );
}

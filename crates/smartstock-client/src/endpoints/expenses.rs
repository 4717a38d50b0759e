use smartstock_core::validation::{validate_expense, validate_expense_update};
use smartstock_core::{CreateExpense, Expense, UpdateExpense};
use tracing::{debug, info};

use crate::client::SmartStockClient;
use crate::error::ClientResult;

const EXPENSES: &str = "contabilidad/expenses/";

impl SmartStockClient {
    /// `GET contabilidad/expenses/`
    pub async fn list_expenses(&self) -> ClientResult<Vec<Expense>> {
        let expenses: Option<Vec<Expense>> = self.http.get(EXPENSES).await?;
        let expenses = expenses.unwrap_or_default();
        debug!(count = expenses.len(), "Expenses loaded");
        Ok(expenses)
    }

    /// `POST contabilidad/expenses/`
    pub async fn create_expense(&self, expense: &CreateExpense) -> ClientResult<Expense> {
        validate_expense(expense)?;
        let created: Expense = self.http.post(EXPENSES, expense).await?;
        info!(
            expense_id = created.id,
            category = %created.category,
            amount = %created.amount,
            "Expense recorded"
        );
        Ok(created)
    }

    /// `PUT contabilidad/expenses/{id}` with only the changed fields.
    pub async fn update_expense(&self, id: i64, update: &UpdateExpense) -> ClientResult<Expense> {
        validate_expense_update(update)?;
        let updated = self
            .http
            .put(&format!("{}{}", EXPENSES, id), update)
            .await?;
        info!(expense_id = id, "Expense updated");
        Ok(updated)
    }

    /// `DELETE contabilidad/expenses/{id}`
    pub async fn delete_expense(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("{}{}", EXPENSES, id)).await?;
        info!(expense_id = id, "Expense deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client_for;
    use crate::error::ClientError;
    use serde_json::json;
    use smartstock_core::{CreateExpense, Money, UpdateExpense};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn expense_json(amount: &str) -> serde_json::Value {
        json!({
            "id": 21,
            "description": "Artículos de limpieza",
            "category": "limpieza",
            "amount": amount,
            "expense_date": "2025-10-17",
            "user_id": 1,
            "notes": "CAJA"
        })
    }

    #[tokio::test]
    async fn test_list_expenses_parses_string_amounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/contabilidad/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([expense_json("120.00")])))
            .mount(&server)
            .await;

        let expenses = client_for(&server).list_expenses().await.unwrap();
        assert_eq!(expenses[0].amount, Money::from_cents(12000));
        assert_eq!(expenses[0].notes.as_deref(), Some("CAJA"));
    }

    #[tokio::test]
    async fn test_create_expense() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contabilidad/expenses/"))
            .and(body_json(json!({
                "description": "Artículos de limpieza",
                "category": "limpieza",
                "amount": 120.0,
                "expense_date": "2025-10-17",
                "user_id": 1,
                "notes": "CAJA"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(expense_json("120.00")))
            .expect(1)
            .mount(&server)
            .await;

        let expense = CreateExpense {
            description: "Artículos de limpieza".to_string(),
            category: "limpieza".to_string(),
            amount: Money::from_cents(12000),
            expense_date: "2025-10-17".to_string(),
            user_id: 1,
            notes: Some("CAJA".to_string()),
        };
        let created = client_for(&server).create_expense(&expense).await.unwrap();
        assert_eq!(created.id, 21);
    }

    #[tokio::test]
    async fn test_update_expense_sends_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/contabilidad/expenses/21"))
            .and(body_json(json!({"amount": 99.9})))
            .respond_with(ResponseTemplate::new(200).set_body_json(expense_json("99.90")))
            .expect(1)
            .mount(&server)
            .await;

        let update = UpdateExpense {
            amount: Some(Money::from_cents(9990)),
            ..Default::default()
        };
        let updated = client_for(&server).update_expense(21, &update).await.unwrap();
        assert_eq!(updated.amount, Money::from_cents(9990));
    }

    #[tokio::test]
    async fn test_empty_update_is_not_sent() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .update_expense(21, &UpdateExpense::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/contabilidad/expenses/21"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "ok"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_expense(21).await.unwrap();
    }
}

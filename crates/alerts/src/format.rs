//! pt-BR message formatting for simulation results.

use braitsure_core::SimulationResult;
use braitsure_engine::best_option;

/// Format a BRL amount with pt-BR separators: `R$ 5.000,25`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {},{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Render a full simulation analysis as a Telegram Markdown message.
pub fn format_results(
    results: &[SimulationResult],
    amount: f64,
    resale_price: f64,
    signature: &str,
) -> String {
    if results.is_empty() {
        return "Não foi possível obter os resultados da simulação. \
                Tente novamente mais tarde."
            .to_string();
    }

    let best = best_option(results);

    let mut message = format!("*Simulação de Arbitragem para {}*\n", format_brl(amount));
    message.push_str(&format!(
        "_Preço de venda Picnic: {}_\n\n",
        format_brl(resale_price)
    ));

    for (index, result) in results.iter().enumerate() {
        match (result.buy_price, result.profit) {
            (Some(buy_price), Some(profit)) => {
                let star = if best == Some(index) {
                    " ⭐️ *Melhor Opção*"
                } else {
                    ""
                };
                let icon = if profit > 0.0 { "🟢" } else { "🔴" };
                let percentage = result.profit_percentage.unwrap_or(0.0);

                message.push_str(&format!("*{}*{}\n", result.exchange.as_str(), star));
                message.push_str(&format!("  - Compra USDT por: {}\n", format_brl(buy_price)));
                if let Some(units) = result.units_after_fee {
                    message.push_str(&format!("  - USDT Recebido: {units:.4}\n"));
                }
                message.push_str(&format!(
                    "  - Lucro/Prejuízo: {icon} *{}* ({percentage:.2}%)\n\n",
                    format_brl(profit)
                ));
            }
            _ => {
                message.push_str(&format!(
                    "*{}*\n  - 🟥 *Falha na Cotação:* nenhuma resposta utilizável da API.\n\n",
                    result.exchange.as_str()
                ));
            }
        }
    }

    let now = chrono::Utc::now();
    message.push_str(&format!(
        "_Análise feita por @{} em {}_",
        signature,
        now.format("%d/%m/%Y %H:%M UTC")
    ));

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use braitsure_core::Exchange;
    use pretty_assertions::assert_eq;

    fn successful_row(exchange: Exchange, profit: f64) -> SimulationResult {
        SimulationResult {
            exchange,
            initial_amount: 5000.0,
            buy_price: Some(5.20),
            units_after_fee: Some(960.5769),
            final_amount: Some(5000.0 + profit),
            profit: Some(profit),
            profit_percentage: Some(profit / 50.0),
        }
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(5000.0), "R$ 5.000,00");
        assert_eq!(format_brl(5.25), "R$ 5,25");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(-32.94), "-R$ 32,94");
        // A negative value that rounds to zero carries no sign.
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_results_marks_best_row() {
        let rows = [
            successful_row(Exchange::Binance, 12.0),
            successful_row(Exchange::Bybit, 32.9),
            SimulationResult::unavailable(Exchange::KuCoin, 5000.0),
        ];
        let message = format_results(&rows, 5000.0, 5.25, "braitsure_bot");

        assert!(message.contains("*Simulação de Arbitragem para R$ 5.000,00*"));
        assert!(message.contains("_Preço de venda Picnic: R$ 5,25_"));
        assert!(message.contains("*Bybit* ⭐️ *Melhor Opção*"));
        assert!(!message.contains("*Binance* ⭐️"));
        assert!(message.contains("*KuCoin*\n  - 🟥 *Falha na Cotação:*"));
        assert!(message.contains("USDT Recebido: 960.5769"));
        assert!(message.contains("@braitsure_bot"));
    }

    #[test]
    fn test_format_results_loss_uses_red_icon() {
        let rows = [successful_row(Exchange::Binance, -4.5)];
        let message = format_results(&rows, 5000.0, 5.25, "braitsure_bot");
        assert!(message.contains("🔴"));
        assert!(message.contains("-R$ 4,50"));
        assert!(!message.contains("Melhor Opção"));
    }

    #[test]
    fn test_format_results_empty() {
        let message = format_results(&[], 5000.0, 5.25, "braitsure_bot");
        assert!(message.contains("Não foi possível obter"));
    }
}

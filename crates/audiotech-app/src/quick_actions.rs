//! Canned prompts offered while the conversation is empty.

/// A one-keystroke shortcut for a common support question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS_TITLE: &str = "Problemas Comuns";

/// Bound to F1..F6 in order.
pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction {
        label: "Logic Pro: Audio Unit Falhou",
        prompt: "Meu plugin não está validando no Plugin Manager do Logic Pro X. Como forçar a validação?",
    },
    QuickAction {
        label: "Logic: System Overload",
        prompt: "Estou recebendo o erro 'System Overload' (Disk is too slow) no Logic Pro. Como resolvo isso?",
    },
    QuickAction {
        label: "Latência / Atraso na Voz",
        prompt: "Estou ouvindo minha voz com atraso (eco) na gravação. Como ajusto o Buffer Size e Low Latency Mode?",
    },
    QuickAction {
        label: "Erro de Licença / iLok",
        prompt: "Meus plugins pararam de abrir e pedem ativação do iLok ou Cloud Session. O que fazer?",
    },
    QuickAction {
        label: "HD Externo 'Somente Leitura'",
        prompt: "Conectei meu HD externo no Mac mas não consigo gravar arquivos nele. Como resolver problemas de permissão ou formato?",
    },
    QuickAction {
        label: "Otimizar Mac para Áudio",
        prompt: "Quais são as configurações essenciais do macOS (Energy Saver, Spotlight, etc) para evitar clicks e pops no áudio?",
    },
];

/// Quick action for function key `F{n}`, 1-based.
pub fn for_function_key(n: u8) -> Option<&'static QuickAction> {
    let index = usize::from(n).checked_sub(1)?;
    QUICK_ACTIONS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_keys_map_in_order() {
        assert_eq!(
            for_function_key(1).map(|a| a.label),
            Some("Logic Pro: Audio Unit Falhou")
        );
        assert_eq!(
            for_function_key(6).map(|a| a.label),
            Some("Otimizar Mac para Áudio")
        );
    }

    #[test]
    fn out_of_range_keys_have_no_action() {
        assert!(for_function_key(0).is_none());
        assert!(for_function_key(7).is_none());
    }

    #[test]
    fn every_action_has_a_question() {
        for action in &QUICK_ACTIONS {
            assert!(!action.label.is_empty());
            assert!(action.prompt.ends_with('?'));
        }
    }
}

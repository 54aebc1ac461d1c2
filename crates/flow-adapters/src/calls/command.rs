use flow_domain::RecentCall;

use crate::navigation::NavTab;

/// Eventos de usuario hacia el simulador.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallCommand {
    Start(RecentCall),
    CallAnyway,
    AddMinutes,
    EndCall,
    ReturnHome,
    Dismiss,
    SwitchTab(NavTab),
}

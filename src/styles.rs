/// Keyframes and helper classes the FAQ and reveal animations refer to by name.
pub const ANIMATIONS: &str = r#"
@keyframes iconBounceOpen {
    0% { transform: rotate(0deg) scale(1); }
    50% { transform: rotate(22.5deg) scale(1.2); color: var(--netflix-red); }
    100% { transform: rotate(45deg) scale(1); color: var(--netflix-red); }
}

@keyframes iconBounceClose {
    0% { transform: rotate(45deg) scale(1); }
    100% { transform: rotate(0deg) scale(1); color: currentColor; }
}

@keyframes fadeInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes fadeOutDown {
    from { opacity: 1; transform: translateY(0); }
    to { opacity: 0; transform: translateY(-20px); }
}

@keyframes slideInFromLeft {
    from { opacity: 0; transform: translateX(-100px); }
    to { opacity: 1; transform: translateX(0); }
}

@keyframes rippleAnimation {
    to { transform: translate(-50%, -50%) scale(2); opacity: 0; }
}

.ripple-effect {
    position: absolute;
    border-radius: 50%;
    background: rgba(229, 9, 20, 0.3);
    animation: rippleAnimation 0.5s cubic-bezier(0.4, 0, 0.2, 1);
    pointer-events: none;
}

.faq-question {
    transition: all 0.3s cubic-bezier(0.4, 0, 0.2, 1);
}

.faq-question span {
    transition: text-shadow 0.3s ease;
}

.faq-icon {
    transition: all 0.3s cubic-bezier(0.4, 0, 0.2, 1);
}

.faq-question:focus {
    outline: 2px solid var(--netflix-red);
    outline-offset: 2px;
    background: rgba(229, 9, 20, 0.1);
}

html {
    scroll-behavior: smooth;
}
"#;

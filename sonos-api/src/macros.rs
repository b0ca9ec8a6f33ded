//! Declarative macros for the command catalogue
//!
//! RenderingControl exposes several settings that differ only by name: the
//! action is `Get<Name>` / `Set<Name>`, the argument `Desired<Name>` and the
//! response field `Current<Name>`. These macros expand one name into the
//! full set of client methods. They are invoked inside the
//! `impl SonosClient` block.

/// Response tag path `s:Envelope / s:Body / u:<Action>Response / <Field>`
///
/// # Example
/// ```rust,ignore
/// const VOLUME: TagPath = response_path!(GetVolume, CurrentVolume);
/// ```
macro_rules! response_path {
    ($action:ident, $field:ident) => {
        &[
            ::soap_client::protocol::SOAP_TAG_ENVELOPE,
            ::soap_client::protocol::SOAP_TAG_BODY,
            concat!("u:", stringify!($action), "Response"),
            stringify!($field),
        ]
    };
}

/// On/off setting of the Master channel: generates `get_<name>`,
/// `set_<name>` and `toggle_<name>`
///
/// # Example
/// ```rust,ignore
/// impl<T: Transport, H: ErrorHandler> SonosClient<T, H> {
///     define_switch_setting!(Mute);
/// }
/// ```
macro_rules! define_switch_setting {
    ($name:ident) => {
        ::paste::paste! {
            #[doc = "Read the `Current" $name "` flag of the Master channel (default `false`)"]
            pub fn [<get_ $name:snake>](&mut self, ip: ::std::net::Ipv4Addr) -> $crate::Result<bool> {
                const PATH: ::soap_client::TagPath = response_path!([<Get $name>], [<Current $name>]);

                let mut value = $crate::client::FlagBuffer::with_default("0");
                let command = ::soap_client::Command::new(
                    ::soap_client::Service::RenderingControl,
                    concat!("Get", stringify!($name)),
                )
                .with_field($crate::actions::CHANNEL, $crate::actions::CHANNEL_MASTER);

                self.query(ip, &command, PATH, &mut value)?;
                Ok($crate::codec::parse_flag(value.as_str()))
            }

            #[doc = "Switch `" $name "` on or off for the Master channel"]
            pub fn [<set_ $name:snake>](&mut self, ip: ::std::net::Ipv4Addr, on: bool) -> $crate::Result<()> {
                let command = ::soap_client::Command::new(
                    ::soap_client::Service::RenderingControl,
                    concat!("Set", stringify!($name)),
                )
                .with_field(concat!("Desired", stringify!($name)), $crate::codec::flag_token(on))
                .with_extra(
                    $crate::actions::CHANNEL_TAG_START,
                    $crate::actions::CHANNEL_MASTER,
                    $crate::actions::CHANNEL_TAG_END,
                );

                self.send(ip, &command)
            }

            #[doc = "Read `" $name "` and write back the opposite"]
            pub fn [<toggle_ $name:snake>](&mut self, ip: ::std::net::Ipv4Addr) -> $crate::Result<()> {
                let on = self.[<get_ $name:snake>](ip)?;
                self.[<set_ $name:snake>](ip, !on)
            }
        }
    };
}

/// Equalizer level clamped to -10..=10: generates `get_<name>` and
/// `set_<name>`
///
/// # Example
/// ```rust,ignore
/// impl<T: Transport, H: ErrorHandler> SonosClient<T, H> {
///     define_eq_setting!(Bass);
/// }
/// ```
macro_rules! define_eq_setting {
    ($name:ident) => {
        ::paste::paste! {
            #[doc = "Read the `Current" $name "` level (default 0, clamped to -10..=10)"]
            pub fn [<get_ $name:snake>](&mut self, ip: ::std::net::Ipv4Addr) -> $crate::Result<i8> {
                const PATH: ::soap_client::TagPath = response_path!([<Get $name>], [<Current $name>]);

                let mut value = $crate::client::NumberBuffer::with_default("0");
                let command = ::soap_client::Command::new(
                    ::soap_client::Service::RenderingControl,
                    concat!("Get", stringify!($name)),
                )
                .with_field($crate::actions::CHANNEL, $crate::actions::CHANNEL_MASTER);

                self.query(ip, &command, PATH, &mut value)?;
                let level = $crate::codec::parse_clamped(
                    value.as_str(),
                    $crate::client::EQ_MIN.into(),
                    $crate::client::EQ_MAX.into(),
                );
                Ok(level as i8)
            }

            #[doc = "Set the `" $name "` level, clamped to -10..=10"]
            pub fn [<set_ $name:snake>](&mut self, ip: ::std::net::Ipv4Addr, level: i8) -> $crate::Result<()> {
                let level = level.clamp($crate::client::EQ_MIN, $crate::client::EQ_MAX);
                let text = $crate::client::format_number(level)?;
                let command = ::soap_client::Command::new(
                    ::soap_client::Service::RenderingControl,
                    concat!("Set", stringify!($name)),
                )
                .with_field(concat!("Desired", stringify!($name)), text.as_str());

                self.send(ip, &command)
            }
        }
    };
}

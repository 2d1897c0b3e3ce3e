//! 用户角色
//!
//! 角色之间是全序关系，权限判断直接比较大小即可：
//!
//! `GUEST < MEMBER < LEADERSHIP < HEAD < ADMIN < APP_ADMIN`

text_enum! {
    /// 用户角色，声明顺序即权限从低到高的顺序
    #[derive(PartialOrd, Ord)]
    pub enum Role {
        Guest => "GUEST",
        Member => "MEMBER",
        Leadership => "LEADERSHIP",
        Head => "HEAD",
        Admin => "ADMIN",
        AppAdmin => "APP_ADMIN",
    }
}

impl Role {
    pub fn is_guest(&self) -> bool {
        *self == Role::Guest
    }

    /// `LEADERSHIP` 及以上
    pub fn is_leadership(&self) -> bool {
        *self >= Role::Leadership
    }

    /// `HEAD` 及以上
    pub fn is_head(&self) -> bool {
        *self >= Role::Head
    }

    /// `ADMIN` 及以上
    pub fn is_admin(&self) -> bool {
        *self >= Role::Admin
    }
}
